//! Per-step validity predicates.
//!
//! Every predicate is pure and total: a partially filled record yields
//! `false`, never a panic, and absent optional fields satisfy their
//! (non-)requirement. The branch-determining inputs are the household status
//! and the declared schooling level, both re-derived from the record on every
//! call.

use super::domain::{SchoolingLevel, WizardStep};
use super::record::{FamilyCaseRecord, GuardianSection, ParentSection};
use super::validation::{is_blank, valid_identifier};

/// The step-gate predicate consulted before forward or jump navigation.
pub fn is_step_valid(step: WizardStep, record: &FamilyCaseRecord) -> bool {
    match step {
        WizardStep::Household => household_valid(record),
        WizardStep::Parents => parents_valid(record),
        WizardStep::Guardian => guardian_valid(record),
        WizardStep::Child => child_valid(record),
        WizardStep::Education => education_valid(record),
        WizardStep::SurveyBasic => {
            let survey = &record.survey_basic;
            all_present(&[&survey.house_status, &survey.occupant_count, &survey.water_source])
        }
        WizardStep::SurveyFinancial => {
            let survey = &record.survey_financial;
            all_present(&[
                &survey.income_source,
                &survey.monthly_expense,
                &survey.outstanding_debt,
            ])
        }
        WizardStep::SurveyAssets => {
            let survey = &record.survey_assets;
            all_present(&[&survey.land_area, &survey.vehicle, &survey.electronics])
        }
        WizardStep::SurveyHealth => {
            let survey = &record.survey_health;
            all_present(&[
                &survey.illness_history,
                &survey.disability,
                &survey.nearest_facility,
            ])
        }
        WizardStep::SurveyReligious => {
            let survey = &record.survey_religious;
            all_present(&[
                &survey.worship_frequency,
                &survey.quran_reading,
                &survey.religious_activity,
            ])
        }
        // Terminal read-only summary.
        WizardStep::Review => true,
    }
}

fn household_valid(record: &FamilyCaseRecord) -> bool {
    let household = &record.household;
    record.status().is_some()
        && all_present(&[
            &household.head_name,
            &household.address,
            &household.phone,
            &household.bank_name,
            &household.bank_account_number,
        ])
        && valid_identifier(&household.national_id)
}

/// Both parents must independently satisfy their branch: the deceased branch
/// requires the death record and ignores everything else for that parent; the
/// living branch requires name plus 16-digit identifier, and the full detail
/// set only for the extended economic tier.
fn parents_valid(record: &FamilyCaseRecord) -> bool {
    let conditions = record.conditions();
    parent_valid(&record.father, conditions.father_deceased, conditions.extended_tier)
        && parent_valid(&record.mother, conditions.mother_deceased, conditions.extended_tier)
}

fn parent_valid(parent: &ParentSection, deceased: bool, extended_tier: bool) -> bool {
    if deceased {
        return all_present(&[&parent.name, &parent.death_date, &parent.death_cause]);
    }

    if is_blank(&parent.name) || !valid_identifier(&parent.national_id) {
        return false;
    }

    if extended_tier {
        all_present(&[
            &parent.religion,
            &parent.birthplace,
            &parent.birthdate,
            &parent.address,
            &parent.monthly_income,
        ])
    } else {
        true
    }
}

/// Vacuously valid whenever no guardian is required, which is what lets the
/// navigator skip the step without the guardian fields blocking the path.
fn guardian_valid(record: &FamilyCaseRecord) -> bool {
    if !record.conditions().guardian_required {
        return true;
    }
    guardian_fields_complete(&record.guardian)
}

fn guardian_fields_complete(guardian: &GuardianSection) -> bool {
    valid_identifier(&guardian.national_id)
        && all_present(&[
            &guardian.name,
            &guardian.relationship,
            &guardian.religion,
            &guardian.birthplace,
            &guardian.birthdate,
            &guardian.address,
            &guardian.monthly_income,
        ])
}

fn child_valid(record: &FamilyCaseRecord) -> bool {
    let child = &record.child;
    all_present(&[&child.name, &child.gender, &child.birthplace, &child.birthdate])
}

fn education_valid(record: &FamilyCaseRecord) -> bool {
    let education = &record.education;
    let Some(level) = record.schooling_level() else {
        return false;
    };

    match level {
        SchoolingLevel::NotEnrolled => true,
        SchoolingLevel::Elementary | SchoolingLevel::JuniorSecondary => all_present(&[
            &education.grade,
            &education.school_name,
            &education.school_address,
        ]),
        SchoolingLevel::SeniorSecondary => all_present(&[
            &education.grade,
            &education.major,
            &education.school_name,
            &education.school_address,
        ]),
        SchoolingLevel::Tertiary => all_present(&[
            &education.semester,
            &education.major,
            &education.school_name,
            &education.school_address,
        ]),
    }
}

fn all_present(values: &[&String]) -> bool {
    values.iter().all(|value| !is_blank(value))
}
