use std::sync::Arc;

use tracing::info;

use crate::intake::repository::RepositoryError;

use super::password::{self, HashError};
use super::repository::{NewUser, UserRepository, UserView};
use super::session::SessionStore;

/// Authentication gate: credential checks, the session table, and the
/// idempotent admin bootstrap.
pub struct AuthService<U> {
    users: Arc<U>,
    sessions: SessionStore,
}

/// Result of the idempotent admin bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitAdminOutcome {
    Created(UserView),
    AlreadyExists,
}

impl<U> AuthService<U>
where
    U: UserRepository + 'static,
{
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            sessions: SessionStore::default(),
        }
    }

    /// Check credentials and mint a session. Unknown usernames and wrong
    /// passwords collapse into one indistinguishable failure; the missing
    /// user path still burns a hash verification.
    pub fn login(&self, username: &str, password: &str) -> Result<(UserView, String), AuthError> {
        let Some(user) = self.users.find_by_username(username)? else {
            password::placeholder_verify(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(&user.password_hash, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.create(user.id);
        Ok((user.view(), token))
    }

    /// Destroy the session unconditionally.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// The user bound to a live session.
    pub fn current_user(&self, token: &str) -> Result<UserView, AuthError> {
        let user_id = self
            .sessions
            .resolve(token)
            .ok_or(AuthError::Unauthorized)?;
        let user = self.users.find_by_id(user_id)?.ok_or(AuthError::Unauthorized)?;
        Ok(user.view())
    }

    /// Create the admin account unless one already exists under that
    /// username. Rerunning never touches the stored hash.
    pub fn init_admin(&self, username: &str, password: &str) -> Result<InitAdminOutcome, AuthError> {
        if self.users.find_by_username(username)?.is_some() {
            return Ok(InitAdminOutcome::AlreadyExists);
        }

        let password_hash = password::hash(password)?;
        match self.users.create(NewUser {
            username: username.to_string(),
            password_hash,
        }) {
            Ok(user) => {
                info!(username = %user.username, "admin account created");
                Ok(InitAdminOutcome::Created(user.view()))
            }
            // Lost a race with a concurrent bootstrap; same answer either way.
            Err(RepositoryError::Conflict) => Ok(InitAdminOutcome::AlreadyExists),
            Err(other) => Err(other.into()),
        }
    }

    /// Sweep hook for the background expiry task.
    pub fn prune_expired_sessions(&self) -> usize {
        self.sessions.prune_expired()
    }
}

/// Error raised by the authentication gate.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Generic credential failure; never reveals whether the username exists.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Hash(#[from] HashError),
}
