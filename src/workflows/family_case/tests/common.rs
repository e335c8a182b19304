use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::workflows::family_case::domain::CaseId;
use crate::workflows::family_case::record::FamilyCaseRecord;
use crate::workflows::family_case::repository::{
    ApiResponse, BankOption, CaseRepository, ReferenceDataProvider, RegionOption, RepositoryError,
};
use crate::workflows::family_case::service::CaseWizardService;
use crate::workflows::family_case::submission::SubmissionPayload;

pub(super) const VALID_ID: &str = "3174051201890001";
pub(super) const VALID_ID_ALT: &str = "3174056709910002";

/// A fully valid general-status record, built through the flat setter so the
/// routing is exercised on every fixture.
pub(super) fn base_record() -> FamilyCaseRecord {
    let mut record = FamilyCaseRecord::default();
    for (name, value) in [
        ("household_status", "general"),
        ("household_head_name", "Budi Santoso"),
        ("household_national_id", VALID_ID),
        ("household_address", "Jl. Melati 12, Jakarta Timur"),
        ("household_phone", "081234567890"),
        ("household_bank_name", "Bank Sejahtera"),
        ("household_bank_account_number", "0012345678"),
        ("household_bank_account_name", "Budi Santoso"),
        ("father_name", "Budi Santoso"),
        ("father_national_id", VALID_ID),
        ("mother_name", "Siti Aminah"),
        ("mother_national_id", VALID_ID_ALT),
        ("child_name", "Andi Santoso"),
        ("child_gender", "male"),
        ("child_birthplace", "Jakarta"),
        ("child_birthdate", "05-08-2015"),
        ("education_level", "elementary"),
        ("education_grade", "3"),
        ("education_school_name", "SDN 01 Menteng"),
        ("education_school_address", "Jl. Kenanga 4"),
        ("survey_basic_house_status", "owned"),
        ("survey_basic_occupant_count", "5"),
        ("survey_basic_water_source", "well"),
        ("survey_financial_income_source", "informal labor"),
        ("survey_financial_monthly_expense", "1500000"),
        ("survey_financial_outstanding_debt", "0"),
        ("survey_assets_land_area", "60"),
        ("survey_assets_vehicle", "motorcycle"),
        ("survey_assets_electronics", "television"),
        ("survey_health_illness_history", "none"),
        ("survey_health_disability", "none"),
        ("survey_health_nearest_facility", "puskesmas"),
        ("survey_religious_worship_frequency", "daily"),
        ("survey_religious_quran_reading", "fluent"),
        ("survey_religious_religious_activity", "weekly study group"),
    ] {
        record.set_field(name, value);
    }
    record
}

pub(super) fn fill_guardian(record: &mut FamilyCaseRecord) {
    for (name, value) in [
        ("guardian_national_id", VALID_ID_ALT),
        ("guardian_name", "Haji Usman"),
        ("guardian_relationship", "uncle"),
        ("guardian_religion", "islam"),
        ("guardian_birthplace", "Bogor"),
        ("guardian_birthdate", "17-03-1970"),
        ("guardian_address", "Jl. Anggrek 2"),
        ("guardian_monthly_income", "2000000"),
    ] {
        record.set_field(name, value);
    }
}

/// Both-parents-deceased record: death fields for both parents plus a
/// complete guardian section.
pub(super) fn orphan_both_record() -> FamilyCaseRecord {
    let mut record = base_record();
    record.set_field("household_status", "orphan_both");
    record.set_field("father_death_date", "10-01-2020");
    record.set_field("father_death_cause", "illness");
    record.set_field("mother_death_date", "22-06-2021");
    record.set_field("mother_death_cause", "accident");
    fill_guardian(&mut record);
    record
}

pub(super) fn ok_envelope(data: Value) -> ApiResponse {
    ApiResponse {
        status: 200,
        success: true,
        data: Some(data),
        message: None,
        errors: None,
    }
}

pub(super) fn validation_envelope(errors: &[(&str, &[&str])]) -> ApiResponse {
    let map = errors
        .iter()
        .map(|(field, messages)| {
            (
                field.to_string(),
                messages.iter().map(|message| message.to_string()).collect(),
            )
        })
        .collect();
    ApiResponse {
        status: 422,
        success: false,
        data: None,
        message: Some("Data tidak valid".to_string()),
        errors: Some(map),
    }
}

pub(super) fn fatal_envelope(message: Option<&str>) -> ApiResponse {
    ApiResponse {
        status: 500,
        success: false,
        data: None,
        message: message.map(str::to_string),
        errors: None,
    }
}

/// Fetched-case payload matching `base_record()` with wire-form dates.
pub(super) fn fetched_case_payload() -> Value {
    json!({
        "household_status": "general",
        "household_head_name": "Budi Santoso",
        "household_national_id": VALID_ID,
        "household_address": "Jl. Melati 12, Jakarta Timur",
        "household_phone": "081234567890",
        "household_bank_name": "Bank Sejahtera",
        "household_bank_account_number": "0012345678",
        "household_bank_account_name": "Budi Santoso",
        "father_name": "Budi Santoso",
        "father_national_id": VALID_ID,
        "mother_name": "Siti Aminah",
        "mother_national_id": VALID_ID_ALT,
        "child_id": "child-77",
        "child_name": "Andi Santoso",
        "child_gender": "male",
        "child_birthplace": "Jakarta",
        "child_birthdate": "2015-08-05",
        "child_photo": "https://cdn.example.org/photos/andi.jpg",
    })
}

pub(super) fn fetched_education_payload() -> Value {
    json!({
        "level": "elementary",
        "grade": "3",
        "school_name": "SDN 01 Menteng",
        "school_address": "Jl. Kenanga 4",
    })
}

/// In-memory transport double with call recording so tests can assert that
/// local gates keep traffic off the network.
#[derive(Default)]
pub(super) struct MemoryCaseRepository {
    pub(super) calls: Mutex<Vec<String>>,
    pub(super) case_response: Mutex<Option<ApiResponse>>,
    pub(super) education_response: Mutex<Option<ApiResponse>>,
    pub(super) submit_response: Mutex<Option<ApiResponse>>,
    pub(super) submit_error: Mutex<Option<RepositoryError>>,
    pub(super) last_payload: Mutex<Option<SubmissionPayload>>,
}

impl MemoryCaseRepository {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(super) fn last_payload(&self) -> Option<SubmissionPayload> {
        self.last_payload
            .lock()
            .expect("payload mutex poisoned")
            .clone()
    }

    fn record_call(&self, name: &str) {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(name.to_string());
    }

    fn submit(&self, payload: &SubmissionPayload) -> Result<ApiResponse, RepositoryError> {
        *self.last_payload.lock().expect("payload mutex poisoned") = Some(payload.clone());
        if let Some(err) = self.submit_error.lock().expect("error mutex poisoned").clone() {
            return Err(err);
        }
        Ok(self
            .submit_response
            .lock()
            .expect("response mutex poisoned")
            .clone()
            .unwrap_or_else(|| ok_envelope(json!({"id": "case-1"}))))
    }
}

impl CaseRepository for MemoryCaseRepository {
    fn fetch_case(&self, _id: &CaseId) -> Result<ApiResponse, RepositoryError> {
        self.record_call("fetch_case");
        self.case_response
            .lock()
            .expect("case mutex poisoned")
            .clone()
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch_child_education(&self, _child_id: &str) -> Result<ApiResponse, RepositoryError> {
        self.record_call("fetch_child_education");
        self.education_response
            .lock()
            .expect("education mutex poisoned")
            .clone()
            .ok_or(RepositoryError::NotFound)
    }

    fn create_case(&self, payload: &SubmissionPayload) -> Result<ApiResponse, RepositoryError> {
        self.record_call("create_case");
        self.submit(payload)
    }

    fn update_case(
        &self,
        _id: &CaseId,
        payload: &SubmissionPayload,
    ) -> Result<ApiResponse, RepositoryError> {
        self.record_call("update_case");
        self.submit(payload)
    }
}

pub(super) struct StaticReference;

impl ReferenceDataProvider for StaticReference {
    fn banks(&self) -> Result<Vec<BankOption>, RepositoryError> {
        Ok(vec![BankOption {
            code: "014".to_string(),
            name: "Bank Sejahtera".to_string(),
        }])
    }

    fn regions(&self) -> Result<Vec<RegionOption>, RepositoryError> {
        Ok(vec![RegionOption {
            id: "31".to_string(),
            name: "DKI Jakarta".to_string(),
            parent_id: None,
        }])
    }
}

pub(super) struct UnavailableReference;

impl ReferenceDataProvider for UnavailableReference {
    fn banks(&self) -> Result<Vec<BankOption>, RepositoryError> {
        Err(RepositoryError::Unavailable("reference API offline".to_string()))
    }

    fn regions(&self) -> Result<Vec<RegionOption>, RepositoryError> {
        Err(RepositoryError::Unavailable("reference API offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    CaseWizardService<MemoryCaseRepository, StaticReference>,
    Arc<MemoryCaseRepository>,
) {
    let repository = Arc::new(MemoryCaseRepository::default());
    let service = CaseWizardService::new(repository.clone(), Arc::new(StaticReference));
    (service, repository)
}
