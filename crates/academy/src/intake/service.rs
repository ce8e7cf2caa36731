use std::sync::Arc;

use super::domain::{Application, ApplicationId, ReviewUpdate};
use super::export;
use super::repository::{ApplicationRepository, RepositoryError};
use super::validation::{self, ApplicationDraft, ValidationError};

/// Facade composing validation, the record store, and the export view.
pub struct IntakeService<R> {
    repository: Arc<R>,
}

impl<R> IntakeService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate a public submission and store it with the initial status.
    /// A validation failure never reaches the store.
    pub fn submit(&self, draft: ApplicationDraft) -> Result<Application, IntakeError> {
        let submission = validation::validate(draft)?;
        let stored = self.repository.create(submission)?;
        Ok(stored)
    }

    /// All stored applications in insertion order, optionally narrowed by a
    /// case-insensitive substring search over the record's columns.
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Application>, IntakeError> {
        let records = self.repository.list()?;
        let filtered = match search.map(str::trim).filter(|needle| !needle.is_empty()) {
            Some(needle) => records
                .into_iter()
                .filter(|record| record.matches_search(needle))
                .collect(),
            None => records,
        };
        Ok(filtered)
    }

    /// Overwrite status and notes on an existing record; every other field
    /// is left untouched.
    pub fn review(
        &self,
        id: ApplicationId,
        update: ReviewUpdate,
    ) -> Result<Application, IntakeError> {
        let updated = self.repository.update_review(id, update)?;
        Ok(updated)
    }

    /// Serialize every stored application as CSV for the admin download.
    pub fn export_csv(&self) -> Result<Vec<u8>, IntakeError> {
        let records = self.repository.list()?;
        export::to_csv(&records).map_err(|err| IntakeError::Export(err.to_string()))
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("csv export failed: {0}")]
    Export(String),
}
