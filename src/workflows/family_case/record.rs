use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{BranchConditions, HouseholdStatus, Photo, SchoolingLevel, WizardStep};

pub const HOUSEHOLD_STATUS: &str = "household_status";
pub const CHILD_PHOTO: &str = "child_photo";

/// The four administrative region sub-fields of the education section. These
/// default to a placeholder id at submission time when left blank.
pub const SCHOOL_REGION_FIELDS: [&str; 4] = [
    "education_school_province_id",
    "education_school_regency_id",
    "education_school_district_id",
    "education_school_village_id",
];

/// Fields whose values follow the date convention: display form `DD-MM-YYYY`
/// in the record, `YYYY-MM-DD` on the wire.
pub fn is_date_field(name: &str) -> bool {
    name.ends_with("date")
}

/// The editable session record: a typed union of per-entity sections exposed
/// as a flat field-name view only at the wizard-screen boundary.
///
/// The record holds the latest value for every field entered this session,
/// including fields of steps not currently in the active path (guardian
/// fields survive a household-status round-trip). Structural equality is what
/// the unsaved-changes guard compares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FamilyCaseRecord {
    pub household: HouseholdSection,
    pub father: ParentSection,
    pub mother: ParentSection,
    pub guardian: GuardianSection,
    pub child: ChildSection,
    pub education: EducationSection,
    pub survey_basic: SurveyBasicSection,
    pub survey_financial: SurveyFinancialSection,
    pub survey_assets: SurveyAssetsSection,
    pub survey_health: SurveyHealthSection,
    pub survey_religious: SurveyReligiousSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HouseholdSection {
    pub status: String,
    pub head_name: String,
    pub national_id: String,
    pub address: String,
    pub phone: String,
    pub bank_name: String,
    pub bank_account_number: String,
    pub bank_account_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentSection {
    pub name: String,
    pub national_id: String,
    pub religion: String,
    pub birthplace: String,
    pub birthdate: String,
    pub address: String,
    pub monthly_income: String,
    pub death_date: String,
    pub death_cause: String,
}

impl ParentSection {
    pub(crate) fn clear_death_fields(&mut self) {
        self.death_date.clear();
        self.death_cause.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuardianSection {
    pub national_id: String,
    pub name: String,
    pub relationship: String,
    pub religion: String,
    pub birthplace: String,
    pub birthdate: String,
    pub address: String,
    pub monthly_income: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChildSection {
    pub name: String,
    pub national_id: String,
    pub gender: String,
    pub birthplace: String,
    pub birthdate: String,
    pub photo: Photo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EducationSection {
    pub level: String,
    pub grade: String,
    pub major: String,
    pub semester: String,
    pub school_name: String,
    pub school_address: String,
    pub school_province_id: String,
    pub school_regency_id: String,
    pub school_district_id: String,
    pub school_village_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyBasicSection {
    pub house_status: String,
    pub occupant_count: String,
    pub water_source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyFinancialSection {
    pub income_source: String,
    pub monthly_expense: String,
    pub outstanding_debt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyAssetsSection {
    pub land_area: String,
    pub vehicle: String,
    pub electronics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyHealthSection {
    pub illness_history: String,
    pub disability: String,
    pub nearest_facility: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyReligiousSection {
    pub worship_frequency: String,
    pub quran_reading: String,
    pub religious_activity: String,
}

impl FamilyCaseRecord {
    /// Overwrite one flat field. Never rejects a value; coercion and
    /// formatting happen later in the submission pipeline. Returns false for
    /// names the record does not know, which callers may log and ignore.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        if name == CHILD_PHOTO {
            self.child.photo = Photo::from_raw(value);
            return true;
        }
        match self.slot_mut(name) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_photo(&mut self, photo: Photo) {
        self.child.photo = photo;
    }

    pub fn photo(&self) -> &Photo {
        &self.child.photo
    }

    /// Flat read access; the photo surfaces as its uri/url.
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == CHILD_PHOTO {
            return Some(self.child.photo.as_field_value());
        }
        self.entries()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn status(&self) -> Option<HouseholdStatus> {
        HouseholdStatus::parse(&self.household.status)
    }

    pub fn schooling_level(&self) -> Option<SchoolingLevel> {
        SchoolingLevel::parse(&self.education.level)
    }

    /// Branch conditions are derived on demand, never stored.
    pub fn conditions(&self) -> BranchConditions {
        BranchConditions::from_raw(&self.household.status)
    }

    /// Every non-blank flat entry, the projection the submission pipeline
    /// copies from.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (name, value) in self.entries() {
            if !value.trim().is_empty() {
                out.insert(name.to_string(), value.to_string());
            }
        }
        let photo = self.child.photo.as_field_value();
        if !photo.is_empty() {
            out.insert(CHILD_PHOTO.to_string(), photo.to_string());
        }
        out
    }

    /// The record slice a wizard screen renders for one step, blanks included.
    pub fn fields_for_step(&self, step: WizardStep) -> BTreeMap<String, String> {
        let prefixes: &[&str] = match step {
            WizardStep::Household => &["household_"],
            WizardStep::Parents => &["father_", "mother_"],
            WizardStep::Guardian => &["guardian_"],
            WizardStep::Child => &["child_"],
            WizardStep::Education => &["education_"],
            WizardStep::SurveyBasic => &["survey_basic_"],
            WizardStep::SurveyFinancial => &["survey_financial_"],
            WizardStep::SurveyAssets => &["survey_assets_"],
            WizardStep::SurveyHealth => &["survey_health_"],
            WizardStep::SurveyReligious => &["survey_religious_"],
            WizardStep::Review => &[""],
        };

        let mut out = BTreeMap::new();
        for (name, value) in self.entries() {
            if prefixes.iter().any(|prefix| name.starts_with(prefix)) {
                out.insert(name.to_string(), value.to_string());
            }
        }
        if matches!(step, WizardStep::Child | WizardStep::Review) {
            out.insert(
                CHILD_PHOTO.to_string(),
                self.child.photo.as_field_value().to_string(),
            );
        }
        out
    }

    /// The identifier fields subject to the 16-digit local pre-submit gate,
    /// paired with their facing labels.
    pub fn identifier_fields(&self) -> [(&'static str, &str, &'static str); 5] {
        [
            (
                "household_national_id",
                self.household.national_id.as_str(),
                "Nomor KK",
            ),
            ("father_national_id", self.father.national_id.as_str(), "NIK Ayah"),
            ("mother_national_id", self.mother.national_id.as_str(), "NIK Ibu"),
            (
                "guardian_national_id",
                self.guardian.national_id.as_str(),
                "NIK Wali",
            ),
            ("child_national_id", self.child.national_id.as_str(), "NIK Anak"),
        ]
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        if let Some(key) = name.strip_prefix("household_") {
            let section = &mut self.household;
            return match key {
                "status" => Some(&mut section.status),
                "head_name" => Some(&mut section.head_name),
                "national_id" => Some(&mut section.national_id),
                "address" => Some(&mut section.address),
                "phone" => Some(&mut section.phone),
                "bank_name" => Some(&mut section.bank_name),
                "bank_account_number" => Some(&mut section.bank_account_number),
                "bank_account_name" => Some(&mut section.bank_account_name),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("father_") {
            return Self::parent_slot_mut(&mut self.father, key);
        }
        if let Some(key) = name.strip_prefix("mother_") {
            return Self::parent_slot_mut(&mut self.mother, key);
        }
        if let Some(key) = name.strip_prefix("guardian_") {
            let section = &mut self.guardian;
            return match key {
                "national_id" => Some(&mut section.national_id),
                "name" => Some(&mut section.name),
                "relationship" => Some(&mut section.relationship),
                "religion" => Some(&mut section.religion),
                "birthplace" => Some(&mut section.birthplace),
                "birthdate" => Some(&mut section.birthdate),
                "address" => Some(&mut section.address),
                "monthly_income" => Some(&mut section.monthly_income),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("child_") {
            let section = &mut self.child;
            return match key {
                "name" => Some(&mut section.name),
                "national_id" => Some(&mut section.national_id),
                "gender" => Some(&mut section.gender),
                "birthplace" => Some(&mut section.birthplace),
                "birthdate" => Some(&mut section.birthdate),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("education_") {
            let section = &mut self.education;
            return match key {
                "level" => Some(&mut section.level),
                "grade" => Some(&mut section.grade),
                "major" => Some(&mut section.major),
                "semester" => Some(&mut section.semester),
                "school_name" => Some(&mut section.school_name),
                "school_address" => Some(&mut section.school_address),
                "school_province_id" => Some(&mut section.school_province_id),
                "school_regency_id" => Some(&mut section.school_regency_id),
                "school_district_id" => Some(&mut section.school_district_id),
                "school_village_id" => Some(&mut section.school_village_id),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("survey_basic_") {
            let section = &mut self.survey_basic;
            return match key {
                "house_status" => Some(&mut section.house_status),
                "occupant_count" => Some(&mut section.occupant_count),
                "water_source" => Some(&mut section.water_source),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("survey_financial_") {
            let section = &mut self.survey_financial;
            return match key {
                "income_source" => Some(&mut section.income_source),
                "monthly_expense" => Some(&mut section.monthly_expense),
                "outstanding_debt" => Some(&mut section.outstanding_debt),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("survey_assets_") {
            let section = &mut self.survey_assets;
            return match key {
                "land_area" => Some(&mut section.land_area),
                "vehicle" => Some(&mut section.vehicle),
                "electronics" => Some(&mut section.electronics),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("survey_health_") {
            let section = &mut self.survey_health;
            return match key {
                "illness_history" => Some(&mut section.illness_history),
                "disability" => Some(&mut section.disability),
                "nearest_facility" => Some(&mut section.nearest_facility),
                _ => None,
            };
        }
        if let Some(key) = name.strip_prefix("survey_religious_") {
            let section = &mut self.survey_religious;
            return match key {
                "worship_frequency" => Some(&mut section.worship_frequency),
                "quran_reading" => Some(&mut section.quran_reading),
                "religious_activity" => Some(&mut section.religious_activity),
                _ => None,
            };
        }
        None
    }

    fn parent_slot_mut<'a>(section: &'a mut ParentSection, key: &str) -> Option<&'a mut String> {
        match key {
            "name" => Some(&mut section.name),
            "national_id" => Some(&mut section.national_id),
            "religion" => Some(&mut section.religion),
            "birthplace" => Some(&mut section.birthplace),
            "birthdate" => Some(&mut section.birthdate),
            "address" => Some(&mut section.address),
            "monthly_income" => Some(&mut section.monthly_income),
            "death_date" => Some(&mut section.death_date),
            "death_cause" => Some(&mut section.death_cause),
            _ => None,
        }
    }

    fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::with_capacity(64);

        let household = &self.household;
        out.extend([
            ("household_status", household.status.as_str()),
            ("household_head_name", household.head_name.as_str()),
            ("household_national_id", household.national_id.as_str()),
            ("household_address", household.address.as_str()),
            ("household_phone", household.phone.as_str()),
            ("household_bank_name", household.bank_name.as_str()),
            (
                "household_bank_account_number",
                household.bank_account_number.as_str(),
            ),
            (
                "household_bank_account_name",
                household.bank_account_name.as_str(),
            ),
        ]);

        Self::parent_entries(&mut out, "father", &self.father);
        Self::parent_entries(&mut out, "mother", &self.mother);

        let guardian = &self.guardian;
        out.extend([
            ("guardian_national_id", guardian.national_id.as_str()),
            ("guardian_name", guardian.name.as_str()),
            ("guardian_relationship", guardian.relationship.as_str()),
            ("guardian_religion", guardian.religion.as_str()),
            ("guardian_birthplace", guardian.birthplace.as_str()),
            ("guardian_birthdate", guardian.birthdate.as_str()),
            ("guardian_address", guardian.address.as_str()),
            ("guardian_monthly_income", guardian.monthly_income.as_str()),
        ]);

        let child = &self.child;
        out.extend([
            ("child_name", child.name.as_str()),
            ("child_national_id", child.national_id.as_str()),
            ("child_gender", child.gender.as_str()),
            ("child_birthplace", child.birthplace.as_str()),
            ("child_birthdate", child.birthdate.as_str()),
        ]);

        let education = &self.education;
        out.extend([
            ("education_level", education.level.as_str()),
            ("education_grade", education.grade.as_str()),
            ("education_major", education.major.as_str()),
            ("education_semester", education.semester.as_str()),
            ("education_school_name", education.school_name.as_str()),
            ("education_school_address", education.school_address.as_str()),
            (
                "education_school_province_id",
                education.school_province_id.as_str(),
            ),
            (
                "education_school_regency_id",
                education.school_regency_id.as_str(),
            ),
            (
                "education_school_district_id",
                education.school_district_id.as_str(),
            ),
            (
                "education_school_village_id",
                education.school_village_id.as_str(),
            ),
        ]);

        out.extend([
            (
                "survey_basic_house_status",
                self.survey_basic.house_status.as_str(),
            ),
            (
                "survey_basic_occupant_count",
                self.survey_basic.occupant_count.as_str(),
            ),
            (
                "survey_basic_water_source",
                self.survey_basic.water_source.as_str(),
            ),
            (
                "survey_financial_income_source",
                self.survey_financial.income_source.as_str(),
            ),
            (
                "survey_financial_monthly_expense",
                self.survey_financial.monthly_expense.as_str(),
            ),
            (
                "survey_financial_outstanding_debt",
                self.survey_financial.outstanding_debt.as_str(),
            ),
            ("survey_assets_land_area", self.survey_assets.land_area.as_str()),
            ("survey_assets_vehicle", self.survey_assets.vehicle.as_str()),
            (
                "survey_assets_electronics",
                self.survey_assets.electronics.as_str(),
            ),
            (
                "survey_health_illness_history",
                self.survey_health.illness_history.as_str(),
            ),
            (
                "survey_health_disability",
                self.survey_health.disability.as_str(),
            ),
            (
                "survey_health_nearest_facility",
                self.survey_health.nearest_facility.as_str(),
            ),
            (
                "survey_religious_worship_frequency",
                self.survey_religious.worship_frequency.as_str(),
            ),
            (
                "survey_religious_quran_reading",
                self.survey_religious.quran_reading.as_str(),
            ),
            (
                "survey_religious_religious_activity",
                self.survey_religious.religious_activity.as_str(),
            ),
        ]);

        out
    }

    fn parent_entries<'a>(
        out: &mut Vec<(&'static str, &'a str)>,
        role: &str,
        section: &'a ParentSection,
    ) {
        let names: [(&'static str, &'a str); 9] = if role == "father" {
            [
                ("father_name", section.name.as_str()),
                ("father_national_id", section.national_id.as_str()),
                ("father_religion", section.religion.as_str()),
                ("father_birthplace", section.birthplace.as_str()),
                ("father_birthdate", section.birthdate.as_str()),
                ("father_address", section.address.as_str()),
                ("father_monthly_income", section.monthly_income.as_str()),
                ("father_death_date", section.death_date.as_str()),
                ("father_death_cause", section.death_cause.as_str()),
            ]
        } else {
            [
                ("mother_name", section.name.as_str()),
                ("mother_national_id", section.national_id.as_str()),
                ("mother_religion", section.religion.as_str()),
                ("mother_birthplace", section.birthplace.as_str()),
                ("mother_birthdate", section.birthdate.as_str()),
                ("mother_address", section.address.as_str()),
                ("mother_monthly_income", section.monthly_income.as_str()),
                ("mother_death_date", section.death_date.as_str()),
                ("mother_death_cause", section.death_cause.as_str()),
            ]
        };
        out.extend(names);
    }
}
