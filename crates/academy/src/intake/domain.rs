use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store at creation. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub i64);

/// Delivery format the applicant asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    Online,
    Offline,
    Hybrid,
}

impl StudyMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            StudyMode::Online => "online",
            StudyMode::Offline => "offline",
            StudyMode::Hybrid => "hybrid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StudyMode::Online => "Online",
            StudyMode::Offline => "On Campus",
            StudyMode::Hybrid => "Hybrid",
        }
    }
}

/// Review state tracked on every stored application. The set is flat: any
/// status may move to any other through the admin update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Contacted,
    Approved,
    Rejected,
    Enrolled,
}

impl ApplicationStatus {
    pub const fn code(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Contacted => "contacted",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Enrolled => "enrolled",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Contacted => "Contacted",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Enrolled => "Enrolled",
        }
    }
}

/// Validated creation payload produced by the validation layer. Everything
/// here came from the applicant; the store adds id, timestamp, and lifecycle
/// fields on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub education: String,
    pub course: String,
    pub mode: StudyMode,
    pub experience: String,
    pub motivation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<String>,
}

/// A stored lead record. `id` and `created_at` are written exactly once, at
/// creation; `status` and `notes` change only through the review path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub submission: NewApplication,
    pub status: ApplicationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Case-insensitive substring match over the searchable columns. A record
    /// matches when any one column contains the needle.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            self.submission.first_name.as_str(),
            self.submission.last_name.as_str(),
            self.submission.email.as_str(),
            self.submission.phone.as_str(),
            self.submission.course.as_str(),
            self.submission.mode.code(),
            self.status.code(),
        ]
        .iter()
        .any(|column| column.to_lowercase().contains(&needle))
    }
}

/// Admin-supplied mutation. Everything else on the record is immutable after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: String,
}

/// Brochure label for a coded education level; unknown codes pass through.
pub fn education_label(code: &str) -> &str {
    match code {
        "high-school" => "High School",
        "diploma" => "Diploma",
        "bachelors" => "Bachelor's Degree",
        "masters" => "Master's Degree",
        "phd" => "Doctorate",
        "other" => "Other",
        other => other,
    }
}

/// Brochure label for a coded experience level; unknown codes pass through.
pub fn experience_label(code: &str) -> &str {
    match code {
        "beginner" => "Beginner",
        "intermediate" => "Intermediate",
        "advanced" => "Advanced",
        other => other,
    }
}
