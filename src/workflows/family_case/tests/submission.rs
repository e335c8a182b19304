use serde_json::json;

use super::common::{base_record, fatal_envelope, ok_envelope, validation_envelope};
use crate::workflows::family_case::domain::{LocalFileHandle, Photo};
use crate::workflows::family_case::submission::{
    build_payload, classify, to_display_date, to_submission_date, SubmissionOutcome,
    GENERIC_FAILURE_MESSAGE, REGION_PLACEHOLDER_ID,
};

#[test]
fn payload_reformats_date_fields_to_wire_form() {
    let mut record = base_record();
    record.set_field("father_death_date", "10-01-2020");
    let payload = build_payload(&record);

    assert_eq!(
        payload.fields.get("child_birthdate").map(String::as_str),
        Some("2015-08-05")
    );
    assert_eq!(
        payload.fields.get("father_death_date").map(String::as_str),
        Some("2020-01-10")
    );
}

#[test]
fn payload_defaults_absent_region_ids_to_the_placeholder() {
    let record = base_record();
    let payload = build_payload(&record);

    for field in [
        "education_school_province_id",
        "education_school_regency_id",
        "education_school_district_id",
        "education_school_village_id",
    ] {
        assert_eq!(
            payload.fields.get(field).map(String::as_str),
            Some(REGION_PLACEHOLDER_ID),
            "{field} not defaulted"
        );
    }
}

#[test]
fn payload_keeps_entered_region_ids() {
    let mut record = base_record();
    record.set_field("education_school_province_id", "31");
    let payload = build_payload(&record);
    assert_eq!(
        payload
            .fields
            .get("education_school_province_id")
            .map(String::as_str),
        Some("31")
    );
}

#[test]
fn unparseable_dates_pass_through_untouched() {
    let mut record = base_record();
    record.set_field("child_birthdate", "99-99-9999");
    let payload = build_payload(&record);
    assert_eq!(
        payload.fields.get("child_birthdate").map(String::as_str),
        Some("99-99-9999")
    );
}

#[test]
fn date_conversion_round_trips() {
    for display in ["05-08-2015", "29-02-2020", "01-01-1999"] {
        let wire = to_submission_date(display);
        assert_eq!(to_display_date(&wire), display);
    }
}

#[test]
fn local_photo_produces_exactly_one_part() {
    let mut record = base_record();
    record.set_photo(Photo::Local(LocalFileHandle {
        uri: "file:///tmp/captures/andi.png".to_string(),
        mime_type_hint: "image/png".to_string(),
    }));

    let payload = build_payload(&record);
    let part = payload.photo.expect("photo part attached");
    assert_eq!(part.file_name, "andi.png");
    assert_eq!(part.content_type, mime::IMAGE_PNG);
    // The raw value never rides along as a plain field.
    assert!(!payload.fields.contains_key("child_photo"));
}

#[test]
fn remote_photo_produces_no_part_at_all() {
    let mut record = base_record();
    record.set_photo(Photo::from_raw("https://cdn.example.org/photos/andi.jpg"));
    let payload = build_payload(&record);
    assert!(payload.photo.is_none());
}

#[test]
fn unparseable_mime_hint_falls_back_to_jpeg() {
    let mut record = base_record();
    record.set_photo(Photo::Local(LocalFileHandle {
        uri: "content://media/external/images/1".to_string(),
        mime_type_hint: "not a mime".to_string(),
    }));
    let part = build_payload(&record).photo.expect("photo part attached");
    assert_eq!(part.content_type, mime::IMAGE_JPEG);
    assert_eq!(part.file_name, "1");
}

#[test]
fn classify_maps_the_success_envelope() {
    let outcome = classify(&ok_envelope(json!({"id": "case-9"})));
    assert_eq!(outcome, SubmissionOutcome::Success(json!({"id": "case-9"})));
}

#[test]
fn classify_exposes_per_field_and_combined_validation_errors() {
    let envelope = validation_envelope(&[
        ("household_national_id", &["Nomor KK sudah terdaftar"]),
        ("child_birthdate", &["Tanggal lahir tidak valid"]),
    ]);

    match classify(&envelope) {
        SubmissionOutcome::ValidationFailure {
            field_errors,
            combined,
        } => {
            assert_eq!(
                field_errors
                    .get("household_national_id")
                    .map(Vec::as_slice),
                Some(&["Nomor KK sudah terdaftar".to_string()][..])
            );
            assert!(combined.contains("Nomor KK sudah terdaftar"));
            assert!(combined.contains("Tanggal lahir tidak valid"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn classify_falls_back_to_the_generic_fatal_message() {
    assert_eq!(
        classify(&fatal_envelope(None)),
        SubmissionOutcome::Fatal(GENERIC_FAILURE_MESSAGE.to_string())
    );
    assert_eq!(
        classify(&fatal_envelope(Some("Server sedang gangguan"))),
        SubmissionOutcome::Fatal("Server sedang gangguan".to_string())
    );
}
