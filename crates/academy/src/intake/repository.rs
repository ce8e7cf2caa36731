use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{Application, ApplicationId, ApplicationStatus, NewApplication, ReviewUpdate};

/// Storage contract for lead applications. The store owns id assignment and
/// the creation timestamp; callers never supply either.
pub trait ApplicationRepository: Send + Sync {
    fn create(&self, submission: NewApplication) -> Result<Application, RepositoryError>;
    fn list(&self) -> Result<Vec<Application>, RepositoryError>;
    fn get(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn update_review(
        &self,
        id: ApplicationId,
        update: ReviewUpdate,
    ) -> Result<Application, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backing the service. The id counter shares a lock
/// with the records, so ids stay sequential and monotonic under concurrent
/// creates.
#[derive(Default)]
pub struct MemoryApplicationRepository {
    state: Mutex<ApplicationState>,
}

#[derive(Default)]
struct ApplicationState {
    next_id: i64,
    records: BTreeMap<i64, Application>,
}

impl ApplicationRepository for MemoryApplicationRepository {
    fn create(&self, submission: NewApplication) -> Result<Application, RepositoryError> {
        let mut state = self.state.lock().expect("application store mutex poisoned");
        state.next_id += 1;
        let record = Application {
            id: ApplicationId(state.next_id),
            submission,
            status: ApplicationStatus::Pending,
            notes: String::new(),
            created_at: Utc::now(),
        };
        state.records.insert(record.id.0, record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<Application>, RepositoryError> {
        let state = self.state.lock().expect("application store mutex poisoned");
        // Ascending id order is insertion order for this store.
        Ok(state.records.values().cloned().collect())
    }

    fn get(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let state = self.state.lock().expect("application store mutex poisoned");
        Ok(state.records.get(&id.0).cloned())
    }

    fn update_review(
        &self,
        id: ApplicationId,
        update: ReviewUpdate,
    ) -> Result<Application, RepositoryError> {
        let mut state = self.state.lock().expect("application store mutex poisoned");
        let record = state
            .records
            .get_mut(&id.0)
            .ok_or(RepositoryError::NotFound)?;
        record.status = update.status;
        record.notes = update.notes;
        Ok(record.clone())
    }
}

impl MemoryApplicationRepository {
    /// Number of stored records; used by tests asserting no partial writes.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .expect("application store mutex poisoned")
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
