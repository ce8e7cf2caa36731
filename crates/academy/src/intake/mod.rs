//! Lead application intake: schema, validation, the record store, the
//! authenticated review surface, and CSV export.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    education_label, experience_label, Application, ApplicationId, ApplicationStatus,
    NewApplication, ReviewUpdate, StudyMode,
};
pub use repository::{ApplicationRepository, MemoryApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{IntakeError, IntakeService};
pub use validation::{ApplicationDraft, FieldError, ValidationError};
