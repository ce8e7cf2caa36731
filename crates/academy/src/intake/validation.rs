use serde::Deserialize;

use super::domain::{NewApplication, StudyMode};

/// Untrusted intake payload as received over the wire. Server-derived fields
/// (`id`, `createdAt`, `status`, `notes`) and anything else unknown are
/// dropped during deserialization, so they can never reach the store.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub referral: Option<String>,
    #[serde(default)]
    pub terms: Option<bool>,
}

/// One rejected field and the reason, in wire-facing field naming.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failing field from a single validation pass. Validation never stops
/// at the first problem; the caller gets the full list.
#[derive(Debug, Clone, thiserror::Error)]
#[error("application failed validation")]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Validate an untrusted draft into a creation payload. Synchronous and
/// side-effect-free; stored values are the trimmed inputs.
pub fn validate(draft: ApplicationDraft) -> Result<NewApplication, ValidationError> {
    let mut errors = Vec::new();

    let first_name = required(&mut errors, "firstName", draft.first_name);
    let last_name = required(&mut errors, "lastName", draft.last_name);

    let email = required(&mut errors, "email", draft.email);
    if let Some(email) = email.as_deref() {
        if !looks_like_email(email) {
            errors.push(FieldError {
                field: "email",
                message: "email must be a valid email address".to_string(),
            });
        }
    }

    let phone = required(&mut errors, "phone", draft.phone);
    if let Some(phone) = phone.as_deref() {
        if phone.chars().count() < 10 {
            errors.push(FieldError {
                field: "phone",
                message: "phone must be at least 10 characters".to_string(),
            });
        }
    }

    let country = required(&mut errors, "country", draft.country);
    let education = required(&mut errors, "education", draft.education);
    let course = required(&mut errors, "course", draft.course);

    let mode = match required(&mut errors, "mode", draft.mode) {
        Some(raw) => {
            let parsed = StudyMode::parse(&raw);
            if parsed.is_none() {
                errors.push(FieldError {
                    field: "mode",
                    message: "mode must be one of online, offline, or hybrid".to_string(),
                });
            }
            parsed
        }
        None => None,
    };

    let experience = required(&mut errors, "experience", draft.experience);
    let motivation = required(&mut errors, "motivation", draft.motivation);

    if draft.terms != Some(true) {
        errors.push(FieldError {
            field: "terms",
            message: "terms must be accepted".to_string(),
        });
    }

    let referral = draft
        .referral
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    if !errors.is_empty() {
        return Err(ValidationError { errors });
    }

    // All required values are Some once the error list is empty.
    Ok(NewApplication {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        country: country.unwrap_or_default(),
        education: education.unwrap_or_default(),
        course: course.unwrap_or_default(),
        mode: mode.unwrap_or(StudyMode::Online),
        experience: experience.unwrap_or_default(),
        motivation: motivation.unwrap_or_default(),
        referral,
    })
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    let trimmed = value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    if trimmed.is_none() {
        errors.push(FieldError {
            field,
            message: format!("{field} is required"),
        });
    }

    trimmed
}

fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}
