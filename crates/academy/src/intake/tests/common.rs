use std::sync::Arc;

use crate::intake::repository::MemoryApplicationRepository;
use crate::intake::service::IntakeService;
use crate::intake::validation::ApplicationDraft;

/// A draft that passes validation; tests override fields as needed.
pub(super) fn draft() -> ApplicationDraft {
    ApplicationDraft {
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        email: Some("jane@x.com".to_string()),
        phone: Some("9999999999".to_string()),
        country: Some("IN".to_string()),
        education: Some("bachelors".to_string()),
        course: Some("python".to_string()),
        mode: Some("online".to_string()),
        experience: Some("beginner".to_string()),
        motivation: Some("I want to move into backend engineering.".to_string()),
        referral: None,
        terms: Some(true),
    }
}

pub(super) fn named_draft(first: &str, last: &str, email: &str) -> ApplicationDraft {
    ApplicationDraft {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(email.to_string()),
        ..draft()
    }
}

pub(super) fn build_service() -> (
    IntakeService<MemoryApplicationRepository>,
    Arc<MemoryApplicationRepository>,
) {
    let repository = Arc::new(MemoryApplicationRepository::default());
    let service = IntakeService::new(repository.clone());
    (service, repository)
}
