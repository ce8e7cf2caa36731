use csv::{QuoteStyle, WriterBuilder};

use super::domain::{education_label, experience_label, Application};

/// Column order for the admin download.
const HEADERS: [&str; 15] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Country",
    "Education",
    "Course",
    "Mode",
    "Experience",
    "Motivation",
    "Referral",
    "Status",
    "Notes",
    "Submitted At",
];

/// Render the records as CSV. Every field is quoted, with embedded quotes
/// doubled, so commas and quotes in free text survive the round trip.
pub fn to_csv(records: &[Application]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for record in records {
        writer.write_record([
            record.id.0.to_string().as_str(),
            record.submission.first_name.as_str(),
            record.submission.last_name.as_str(),
            record.submission.email.as_str(),
            record.submission.phone.as_str(),
            record.submission.country.as_str(),
            education_label(&record.submission.education),
            record.submission.course.as_str(),
            record.submission.mode.label(),
            experience_label(&record.submission.experience),
            record.submission.motivation.as_str(),
            record.submission.referral.as_deref().unwrap_or(""),
            record.status.label(),
            record.notes.as_str(),
            record.created_at.to_rfc3339().as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
