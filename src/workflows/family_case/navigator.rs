//! Step transition rules.
//!
//! `next` re-validates the current step against the rules before moving;
//! `jump` trusts the cached validity map for the predecessor check. All
//! rejections are side-effect-free; the caller owns user-facing messaging.

use std::collections::BTreeMap;

use super::domain::{BranchConditions, WizardStep};
use super::record::FamilyCaseRecord;
use super::rules;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("step {0:?} is incomplete")]
    StepIncomplete(WizardStep),
    #[error("the guardian step is not part of the active path")]
    GuardianNotRequired,
    #[error("step {blocked_by:?} must be completed first")]
    PrerequisiteIncomplete { blocked_by: WizardStep },
    #[error("the review step only transitions to submission or back")]
    AtReview,
    #[error("already at the first step")]
    AtFirstStep,
}

/// Forward transition. The current step is re-validated here rather than read
/// from the cached map; Parents skips straight to Child when no guardian is
/// required.
pub fn next(
    current: WizardStep,
    record: &FamilyCaseRecord,
) -> Result<WizardStep, NavigationError> {
    if current == WizardStep::Review {
        return Err(NavigationError::AtReview);
    }
    if !rules::is_step_valid(current, record) {
        return Err(NavigationError::StepIncomplete(current));
    }

    let conditions = record.conditions();
    if current == WizardStep::Parents && !conditions.guardian_required {
        return Ok(WizardStep::Child);
    }

    WizardStep::at_ordinal(current.ordinal() + 1).ok_or(NavigationError::AtReview)
}

/// Backward transition. Guardian always returns to Parents; Child mirrors the
/// forward skip when no guardian is required.
pub fn previous(
    current: WizardStep,
    conditions: BranchConditions,
) -> Result<WizardStep, NavigationError> {
    match current {
        WizardStep::Household => Err(NavigationError::AtFirstStep),
        WizardStep::Guardian => Ok(WizardStep::Parents),
        WizardStep::Child if !conditions.guardian_required => Ok(WizardStep::Parents),
        _ => WizardStep::at_ordinal(current.ordinal().saturating_sub(1))
            .ok_or(NavigationError::AtFirstStep),
    }
}

/// Random-access transition. Accepted only when every step strictly before
/// the target in ordinal order is currently marked valid, not counting
/// Guardian when it is outside the active path.
pub fn jump(
    target: WizardStep,
    conditions: BranchConditions,
    validity: &BTreeMap<WizardStep, bool>,
) -> Result<WizardStep, NavigationError> {
    if target == WizardStep::Guardian && !conditions.guardian_required {
        return Err(NavigationError::GuardianNotRequired);
    }

    for step in WizardStep::ordered() {
        if step.ordinal() >= target.ordinal() {
            break;
        }
        if step == WizardStep::Guardian && !conditions.guardian_required {
            continue;
        }
        if !validity.get(&step).copied().unwrap_or(false) {
            return Err(NavigationError::PrerequisiteIncomplete { blocked_by: step });
        }
    }

    Ok(target)
}
