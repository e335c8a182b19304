use std::collections::BTreeMap;

use super::common::{base_record, fill_guardian, orphan_both_record};
use crate::workflows::family_case::domain::WizardStep;
use crate::workflows::family_case::navigator::{jump, next, previous, NavigationError};
use crate::workflows::family_case::record::FamilyCaseRecord;
use crate::workflows::family_case::rules::is_step_valid;

fn validity_for(record: &FamilyCaseRecord) -> BTreeMap<WizardStep, bool> {
    WizardStep::ordered()
        .into_iter()
        .map(|step| (step, is_step_valid(step, record)))
        .collect()
}

#[test]
fn next_advances_through_the_ordinal_sequence() {
    let record = base_record();
    assert_eq!(
        next(WizardStep::Household, &record),
        Ok(WizardStep::Parents)
    );
    assert_eq!(next(WizardStep::Child, &record), Ok(WizardStep::Education));
}

#[test]
fn next_rejects_when_the_current_step_is_invalid() {
    let mut record = base_record();
    record.set_field("household_head_name", "");
    assert_eq!(
        next(WizardStep::Household, &record),
        Err(NavigationError::StepIncomplete(WizardStep::Household))
    );
}

#[test]
fn next_skips_guardian_when_not_required() {
    let record = base_record();
    assert_eq!(next(WizardStep::Parents, &record), Ok(WizardStep::Child));
}

#[test]
fn next_visits_guardian_for_orphan_both() {
    let record = orphan_both_record();
    assert_eq!(next(WizardStep::Parents, &record), Ok(WizardStep::Guardian));
    assert_eq!(next(WizardStep::Guardian, &record), Ok(WizardStep::Child));
}

#[test]
fn next_has_no_transition_out_of_review() {
    let record = base_record();
    assert_eq!(
        next(WizardStep::Review, &record),
        Err(NavigationError::AtReview)
    );
}

#[test]
fn previous_mirrors_the_forward_skip() {
    let general = base_record().conditions();
    assert_eq!(
        previous(WizardStep::Child, general),
        Ok(WizardStep::Parents)
    );

    let orphan = orphan_both_record().conditions();
    assert_eq!(
        previous(WizardStep::Child, orphan),
        Ok(WizardStep::Guardian)
    );
    assert_eq!(
        previous(WizardStep::Guardian, orphan),
        Ok(WizardStep::Parents)
    );
    assert_eq!(
        previous(WizardStep::Household, general),
        Err(NavigationError::AtFirstStep)
    );
}

#[test]
fn jump_rejects_guardian_when_not_in_the_active_path() {
    let record = base_record();
    let validity = validity_for(&record);
    assert_eq!(
        jump(WizardStep::Guardian, record.conditions(), &validity),
        Err(NavigationError::GuardianNotRequired)
    );
}

#[test]
fn jump_requires_every_predecessor_to_be_valid() {
    let record = base_record();
    let mut validity = validity_for(&record);
    validity.insert(WizardStep::Child, false);

    assert_eq!(
        jump(WizardStep::SurveyBasic, record.conditions(), &validity),
        Err(NavigationError::PrerequisiteIncomplete {
            blocked_by: WizardStep::Child
        })
    );
    // Jumping to or before the invalid step stays allowed.
    assert_eq!(
        jump(WizardStep::Child, record.conditions(), &validity),
        Ok(WizardStep::Child)
    );
    assert_eq!(
        jump(WizardStep::Parents, record.conditions(), &validity),
        Ok(WizardStep::Parents)
    );
}

#[test]
fn jump_counts_guardian_validity_when_required() {
    let mut record = base_record();
    record.set_field("household_status", "orphan_both");
    record.set_field("father_death_date", "10-01-2020");
    record.set_field("father_death_cause", "illness");
    record.set_field("mother_death_date", "22-06-2021");
    record.set_field("mother_death_cause", "accident");

    // Guardian is in the active path and still incomplete: Child is blocked.
    let validity = validity_for(&record);
    assert_eq!(
        jump(WizardStep::Child, record.conditions(), &validity),
        Err(NavigationError::PrerequisiteIncomplete {
            blocked_by: WizardStep::Guardian
        })
    );

    fill_guardian(&mut record);
    let validity = validity_for(&record);
    assert_eq!(
        jump(WizardStep::Child, record.conditions(), &validity),
        Ok(WizardStep::Child)
    );
}

#[test]
fn jump_ignores_guardian_validity_when_skipped() {
    let record = base_record();
    let mut validity = validity_for(&record);
    validity.insert(WizardStep::Guardian, false);

    assert_eq!(
        jump(WizardStep::Review, record.conditions(), &validity),
        Ok(WizardStep::Review)
    );
}

/// Every permutation of validity flags over the steps before the target must
/// accept exactly when all non-skipped predecessors are valid.
#[test]
fn jump_prerequisite_rule_holds_for_all_validity_permutations() {
    let record = base_record();
    let conditions = record.conditions();
    let target = WizardStep::Education;
    // Predecessors with Guardian skipped: Household, Parents, Child.
    let predecessors = [WizardStep::Household, WizardStep::Parents, WizardStep::Child];

    for mask in 0u8..8 {
        let mut validity = BTreeMap::new();
        for (bit, step) in predecessors.iter().enumerate() {
            validity.insert(*step, mask & (1 << bit) != 0);
        }
        let expected_ok = mask == 0b111;
        let result = jump(target, conditions, &validity);
        assert_eq!(
            result.is_ok(),
            expected_ok,
            "mask {mask:03b} produced {result:?}"
        );
    }
}
