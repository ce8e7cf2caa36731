use super::common::*;
use crate::intake::domain::{ApplicationId, ApplicationStatus, ReviewUpdate};
use crate::intake::repository::RepositoryError;
use crate::intake::service::IntakeError;
use crate::intake::validation::ApplicationDraft;
use chrono::Utc;

#[test]
fn submit_assigns_sequential_ids_and_initial_lifecycle() {
    let (service, _) = build_service();

    let before = Utc::now();
    let first = service.submit(draft()).expect("first submission stores");
    let second = service.submit(draft()).expect("second submission stores");
    let after = Utc::now();

    assert!(second.id.0 > first.id.0, "ids must be strictly increasing");
    assert_eq!(first.id, ApplicationId(1));
    assert_eq!(first.status, ApplicationStatus::Pending);
    assert!(first.notes.is_empty());
    assert!(first.created_at >= before && first.created_at <= after);
}

#[test]
fn failed_validation_never_touches_the_store() {
    let (service, repository) = build_service();

    let result = service.submit(ApplicationDraft::default());
    let Err(IntakeError::Validation(invalid)) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert!(!invalid.errors.is_empty());
    assert!(repository.is_empty(), "no partial writes on failure");
}

#[test]
fn list_preserves_insertion_order() {
    let (service, _) = build_service();
    service
        .submit(named_draft("Alice", "Archer", "alice@example.com"))
        .expect("stores");
    service
        .submit(named_draft("Bob", "Briggs", "bob@example.com"))
        .expect("stores");
    service
        .submit(named_draft("Cara", "Crane", "cara@example.com"))
        .expect("stores");

    let records = service.list(None).expect("list succeeds");
    let names: Vec<&str> = records
        .iter()
        .map(|record| record.submission.first_name.as_str())
        .collect();
    assert_eq!(names, ["Alice", "Bob", "Cara"]);
}

#[test]
fn search_is_a_case_insensitive_substring_match() {
    let (service, _) = build_service();
    service
        .submit(named_draft("Alice", "Archer", "alice@example.com"))
        .expect("stores");
    service
        .submit(named_draft("Bob", "Briggs", "bob@example.com"))
        .expect("stores");

    let hits = service.list(Some("ali")).expect("search succeeds");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].submission.first_name, "Alice");

    let hits = service.list(Some("ALI")).expect("search succeeds");
    assert_eq!(hits.len(), 1);

    let hits = service.list(Some("zzz")).expect("search succeeds");
    assert!(hits.is_empty());

    // Blank search terms behave like no search at all.
    let hits = service.list(Some("   ")).expect("search succeeds");
    assert_eq!(hits.len(), 2);
}

#[test]
fn search_covers_status_and_course_columns() {
    let (service, _) = build_service();
    let stored = service
        .submit(named_draft("Alice", "Archer", "alice@example.com"))
        .expect("stores");
    service
        .review(
            stored.id,
            ReviewUpdate {
                status: ApplicationStatus::Enrolled,
                notes: String::new(),
            },
        )
        .expect("review succeeds");

    let hits = service.list(Some("enrolled")).expect("search succeeds");
    assert_eq!(hits.len(), 1);

    let hits = service.list(Some("pyth")).expect("search succeeds");
    assert_eq!(hits.len(), 1);
}

#[test]
fn review_overwrites_only_status_and_notes() {
    let (service, _) = build_service();
    let stored = service.submit(draft()).expect("submission stores");

    let updated = service
        .review(
            stored.id,
            ReviewUpdate {
                status: ApplicationStatus::Approved,
                notes: "strong motivation".to_string(),
            },
        )
        .expect("review succeeds");

    assert_eq!(updated.status, ApplicationStatus::Approved);
    assert_eq!(updated.notes, "strong motivation");
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.submission, stored.submission);
    assert_eq!(updated.created_at, stored.created_at);
}

#[test]
fn review_of_a_missing_id_reports_not_found() {
    let (service, _) = build_service();

    let result = service.review(
        ApplicationId(404),
        ReviewUpdate {
            status: ApplicationStatus::Contacted,
            notes: String::new(),
        },
    );

    assert!(matches!(
        result,
        Err(IntakeError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn any_status_may_move_to_any_other() {
    // The status set is deliberately flat; there is no transition table.
    let (service, _) = build_service();
    let stored = service.submit(draft()).expect("submission stores");

    for status in [
        ApplicationStatus::Enrolled,
        ApplicationStatus::Pending,
        ApplicationStatus::Rejected,
        ApplicationStatus::Contacted,
    ] {
        let updated = service
            .review(
                stored.id,
                ReviewUpdate {
                    status,
                    notes: String::new(),
                },
            )
            .expect("review succeeds");
        assert_eq!(updated.status, status);
    }
}
