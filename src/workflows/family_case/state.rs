use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{BranchConditions, WizardStep};
use super::record::{FamilyCaseRecord, HOUSEHOLD_STATUS};
use super::rules;
use super::validation;

/// What the rendering layer receives for the step currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: WizardStep,
    pub step_label: &'static str,
    pub fields: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub valid: bool,
}

/// The mutable wizard session: current step pointer, the editable record, the
/// cached per-step validity map, the per-field error map, and the
/// loading/submitting flags. Owns every mutation entry point.
#[derive(Debug, Clone)]
pub struct WizardState {
    record: FamilyCaseRecord,
    current_step: WizardStep,
    step_validity: BTreeMap<WizardStep, bool>,
    field_errors: BTreeMap<String, String>,
    loading: bool,
    submitting: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        let mut state = Self {
            record: FamilyCaseRecord::default(),
            current_step: WizardStep::Household,
            step_validity: BTreeMap::new(),
            field_errors: BTreeMap::new(),
            loading: false,
            submitting: false,
        };
        state.refresh_validity();
        state
    }

    pub fn record(&self) -> &FamilyCaseRecord {
        &self.record
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub(crate) fn set_current_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn conditions(&self) -> BranchConditions {
        self.record.conditions()
    }

    pub fn step_validity(&self) -> &BTreeMap<WizardStep, bool> {
        &self.step_validity
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Overwrite one field. The field's pending error is cleared before the
    /// validity recomputation (both happen synchronously from the same edit).
    ///
    /// Changing the household status re-derives the parent branch conditions;
    /// whichever parent's deceased branch just turned false has its death
    /// fields cleared so stale values cannot reach the server under the wrong
    /// branch. Values are never rejected.
    pub fn set_field(&mut self, name: &str, value: &str) {
        self.field_errors.remove(name);

        if name == HOUSEHOLD_STATUS {
            let before = self.record.conditions();
            self.record.set_field(name, value);
            let after = self.record.conditions();

            if before.father_deceased && !after.father_deceased {
                self.record.father.clear_death_fields();
                self.field_errors.remove("father_death_date");
                self.field_errors.remove("father_death_cause");
            }
            if before.mother_deceased && !after.mother_deceased {
                self.record.mother.clear_death_fields();
                self.field_errors.remove("mother_death_date");
                self.field_errors.remove("mother_death_cause");
            }
        } else if !self.record.set_field(name, value) {
            tracing::debug!(field = name, "ignoring unknown record field");
            return;
        }

        self.refresh_step(self.current_step);
        // A status change shifts the required sets of downstream steps too.
        if name == HOUSEHOLD_STATUS {
            self.refresh_step(WizardStep::Parents);
            self.refresh_step(WizardStep::Guardian);
        }
    }

    pub fn set_photo(&mut self, photo: super::domain::Photo) {
        self.field_errors.remove(super::record::CHILD_PHOTO);
        self.record.set_photo(photo);
        self.refresh_step(self.current_step);
    }

    /// Externally supplied validity, stored for the navigator's jump rule so
    /// it does not recompute every step on every render.
    pub fn update_step_validity(&mut self, step: WizardStep, valid: bool) {
        self.step_validity.insert(step, valid);
    }

    /// Recompute one step from the rules and cache the result.
    pub fn refresh_step(&mut self, step: WizardStep) {
        let valid = rules::is_step_valid(step, &self.record);
        self.step_validity.insert(step, valid);
    }

    /// Recompute every step, used after bulk hydration.
    pub fn refresh_validity(&mut self) {
        for step in WizardStep::ordered() {
            self.refresh_step(step);
        }
    }

    /// Bulk-replace for edit-mode hydration. Must run before the
    /// unsaved-changes snapshot is taken.
    pub fn load_record(&mut self, record: FamilyCaseRecord) {
        self.record = record;
        self.field_errors.clear();
        self.refresh_validity();
    }

    pub fn set_field_error(&mut self, name: &str, message: String) {
        self.field_errors.insert(name.to_string(), message);
    }

    pub fn merge_field_errors(&mut self, errors: BTreeMap<String, String>) {
        self.field_errors.extend(errors);
    }

    /// Batch 16-digit check over every identifier field, the local gate that
    /// blocks submission before any network call.
    pub fn identifier_errors(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (name, value, label) in self.record.identifier_fields() {
            if let Some(message) = validation::fixed_length_id(value) {
                errors.insert(name.to_string(), format!("{label}: {message}"));
            }
        }
        errors
    }

    /// The projection handed to the rendering layer for the current step.
    pub fn step_view(&self) -> StepView {
        let step = self.current_step;
        let fields = self.record.fields_for_step(step);
        let errors = self
            .field_errors
            .iter()
            .filter(|(name, _)| fields.contains_key(*name))
            .map(|(name, message)| (name.clone(), message.clone()))
            .collect();

        StepView {
            step,
            step_label: step.label(),
            fields,
            errors,
            valid: self.step_validity.get(&step).copied().unwrap_or(false),
        }
    }
}
