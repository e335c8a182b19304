//! Server-bound payload assembly and response classification.
//!
//! The payload is a write-only projection of the record: region ids gain a
//! placeholder default, date fields flip from display form to wire form, and
//! the photo becomes a binary part only when it is a locally-picked file.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use super::domain::Photo;
use super::record::{is_date_field, FamilyCaseRecord, SCHOOL_REGION_FIELDS};
use super::repository::ApiResponse;

/// Placeholder id submitted for the school region sub-fields when absent.
pub const REGION_PLACEHOLDER_ID: &str = "0";

/// Dates as the user types them.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";
/// Dates as the server expects them.
pub const SUBMISSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Non-field-specific fallback shown for transport and server errors.
pub const GENERIC_FAILURE_MESSAGE: &str = "Terjadi kesalahan. Silakan coba lagi.";

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub fields: BTreeMap<String, String>,
    pub photo: Option<PhotoPart>,
}

/// Binary part attached for a locally-picked photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPart {
    pub uri: String,
    pub content_type: mime::Mime,
    pub file_name: String,
}

/// Outcome taxonomy for a submission attempt. `ValidationFailure` carries
/// both the per-field map (the default surface) and a flattened combined
/// string for single-banner displays.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(Value),
    ValidationFailure {
        field_errors: BTreeMap<String, Vec<String>>,
        combined: String,
    },
    Fatal(String),
}

/// Project the record into its server-bound shape. Total: unparseable date
/// strings pass through untouched and never fail the build.
pub fn build_payload(record: &FamilyCaseRecord) -> SubmissionPayload {
    let mut fields = BTreeMap::new();

    for (name, value) in record.fields() {
        if name == super::record::CHILD_PHOTO {
            continue;
        }
        let value = if is_date_field(&name) {
            to_submission_date(&value)
        } else {
            value
        };
        fields.insert(name, value);
    }

    for region_field in SCHOOL_REGION_FIELDS {
        fields
            .entry(region_field.to_string())
            .or_insert_with(|| REGION_PLACEHOLDER_ID.to_string());
    }

    SubmissionPayload {
        fields,
        photo: photo_part(record.photo()),
    }
}

/// A remote URL means the server already holds the photo: no part at all, the
/// server keeps the existing one. A local handle is attached exactly once.
fn photo_part(photo: &Photo) -> Option<PhotoPart> {
    match photo {
        Photo::Local(handle) => {
            let content_type = handle
                .mime_type_hint
                .parse::<mime::Mime>()
                .unwrap_or(mime::IMAGE_JPEG);
            let file_name = handle
                .uri
                .rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .unwrap_or("photo.jpg")
                .to_string();
            Some(PhotoPart {
                uri: handle.uri.clone(),
                content_type,
                file_name,
            })
        }
        Photo::Remote { .. } | Photo::Empty => None,
    }
}

/// `DD-MM-YYYY` -> `YYYY-MM-DD`; anything else passes through unchanged.
pub fn to_submission_date(display: &str) -> String {
    match NaiveDate::parse_from_str(display.trim(), DISPLAY_DATE_FORMAT) {
        Ok(date) => date.format(SUBMISSION_DATE_FORMAT).to_string(),
        Err(_) => display.to_string(),
    }
}

/// `YYYY-MM-DD` -> `DD-MM-YYYY`, the exact inverse, used when hydrating a
/// fetched case into the editable record.
pub fn to_display_date(wire: &str) -> String {
    match NaiveDate::parse_from_str(wire.trim(), SUBMISSION_DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => wire.to_string(),
    }
}

/// Classify the server's response envelope.
pub fn classify(response: &ApiResponse) -> SubmissionOutcome {
    if response.is_success() {
        return SubmissionOutcome::Success(response.data.clone().unwrap_or(Value::Null));
    }

    if response.status == 422 {
        let field_errors = response.errors.clone().unwrap_or_default();
        let combined = flatten_errors(&field_errors, response.message.as_deref());
        return SubmissionOutcome::ValidationFailure {
            field_errors,
            combined,
        };
    }

    let message = response
        .message
        .clone()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    SubmissionOutcome::Fatal(message)
}

fn flatten_errors(errors: &BTreeMap<String, Vec<String>>, fallback: Option<&str>) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for messages in errors.values() {
        for message in messages {
            lines.push(message);
        }
    }
    if lines.is_empty() {
        return fallback
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string();
    }
    lines.join("\n")
}
