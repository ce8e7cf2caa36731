use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::intake::repository::RepositoryError;

/// Stored admin principal. The hash never leaves the process; API responses
/// use [`UserView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Sanitized representation of an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
}

/// Creation payload for the user collection.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Storage contract for admin accounts. Usernames are unique; the store
/// rejects duplicates with [`RepositoryError::Conflict`].
pub trait UserRepository: Send + Sync {
    fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
    fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}

/// Process-local user store with store-owned sequential ids.
#[derive(Default)]
pub struct MemoryUserRepository {
    state: Mutex<UserState>,
}

#[derive(Default)]
struct UserState {
    next_id: i64,
    records: BTreeMap<i64, User>,
}

impl UserRepository for MemoryUserRepository {
    fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().expect("user store mutex poisoned");
        if state
            .records
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(RepositoryError::Conflict);
        }
        state.next_id += 1;
        let record = User {
            id: state.next_id,
            username: user.username,
            password_hash: user.password_hash,
        };
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().expect("user store mutex poisoned");
        Ok(state.records.get(&id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().expect("user store mutex poisoned");
        Ok(state
            .records
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}
