use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "sid";

/// Fixed session lifetime. Not refreshed on use; a session minted at login
/// expires 24 hours later regardless of activity.
const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// Server-side session table keyed by an opaque id. Expired entries are
/// rejected on read and removed by the periodic sweep.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Mint a session bound to the user and return its opaque id.
    pub fn create(&self, user_id: i64) -> String {
        self.create_at(user_id, Utc::now())
    }

    fn create_at(&self, user_id: i64, now: DateTime<Utc>) -> String {
        let token = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            user_id,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        };
        self.sessions
            .lock()
            .expect("session store mutex poisoned")
            .insert(token.clone(), entry);
        token
    }

    /// The bound user id, unless the session is missing or past its expiry.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.resolve_at(token, Utc::now())
    }

    fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<i64> {
        let sessions = self.sessions.lock().expect("session store mutex poisoned");
        sessions
            .get(token)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.user_id)
    }

    /// Drop the session unconditionally; unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        self.sessions
            .lock()
            .expect("session store mutex poisoned")
            .remove(token);
    }

    /// Remove expired sessions, returning how many were dropped.
    pub fn prune_expired(&self) -> usize {
        self.prune_at(Utc::now())
    }

    fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().expect("session store mutex poisoned");
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    /// Live session count; used by tests and the sweep log line.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session store mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
