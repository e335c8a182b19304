use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{CaseId, WizardStep};
use super::guard::UnsavedChangesGuard;
use super::navigator::{self, NavigationError};
use super::record::{is_date_field, FamilyCaseRecord};
use super::repository::{CaseRepository, ReferenceData, ReferenceDataProvider, RepositoryError};
use super::state::{StepView, WizardState};
use super::submission::{
    build_payload, classify, to_display_date, SubmissionOutcome, GENERIC_FAILURE_MESSAGE,
};

/// Whether the session creates a new case or edits a persisted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit(CaseId),
}

/// One wizard session: the mutable state, the unsaved-changes guard snapshot
/// taken at load time, the session mode, and the reference lists the
/// household step renders from.
#[derive(Debug, Clone)]
pub struct WizardSession {
    state: WizardState,
    guard: UnsavedChangesGuard,
    mode: WizardMode,
    reference: ReferenceData,
}

impl WizardSession {
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn guard(&self) -> &UnsavedChangesGuard {
        &self.guard
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.state.set_field(name, value);
    }

    pub fn set_photo(&mut self, photo: super::domain::Photo) {
        self.state.set_photo(photo);
    }

    pub fn step_view(&self) -> StepView {
        self.state.step_view()
    }

    /// Forward navigation; re-validates the current step first.
    pub fn advance(&mut self) -> Result<WizardStep, NavigationError> {
        let current = self.state.current_step();
        self.state.refresh_step(current);
        let target = navigator::next(current, self.state.record())?;
        self.state.set_current_step(target);
        Ok(target)
    }

    pub fn retreat(&mut self) -> Result<WizardStep, NavigationError> {
        let target =
            navigator::previous(self.state.current_step(), self.state.record().conditions())?;
        self.state.set_current_step(target);
        Ok(target)
    }

    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, NavigationError> {
        let target = navigator::jump(
            target,
            self.state.record().conditions(),
            self.state.step_validity(),
        )?;
        self.state.set_current_step(target);
        Ok(target)
    }

    /// True when a navigation-away attempt should be intercepted.
    pub fn should_block_exit(&self) -> bool {
        self.guard
            .should_intercept(self.state.record(), self.state.is_submitting())
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut WizardState {
        &mut self.state
    }
}

/// Orchestrates hydration and submission against the transport collaborators.
pub struct CaseWizardService<R, D> {
    repository: Arc<R>,
    reference: Arc<D>,
}

impl<R, D> CaseWizardService<R, D>
where
    R: CaseRepository + 'static,
    D: ReferenceDataProvider + 'static,
{
    pub fn new(repository: Arc<R>, reference: Arc<D>) -> Self {
        Self {
            repository,
            reference,
        }
    }

    /// Start a blank session. The wizard blocks on the reference lists before
    /// the household step is usable, so they are loaded here.
    pub fn start_new(&self) -> Result<WizardSession, WizardServiceError> {
        let reference = self.load_reference()?;
        let state = WizardState::new();
        let guard = UnsavedChangesGuard::snapshot(state.record());

        Ok(WizardSession {
            state,
            guard,
            mode: WizardMode::Create,
            reference,
        })
    }

    /// Start an edit session: fetch the case, hydrate the record, run the
    /// dependent education fetch, then snapshot. Failures here are page-level
    /// and retryable, distinct from in-wizard errors.
    pub fn start_edit(&self, case_id: CaseId) -> Result<WizardSession, WizardServiceError> {
        let response = self
            .repository
            .fetch_case(&case_id)
            .map_err(|err| WizardServiceError::Hydration(err.to_string()))?;
        if !response.is_success() {
            return Err(WizardServiceError::Hydration(envelope_message(&response.message)));
        }

        let mut record = FamilyCaseRecord::default();
        let data = response.data.unwrap_or(Value::Null);
        hydrate_flat(&mut record, &data, "");

        if let Some(child_id) = child_key(&data) {
            let education = self
                .repository
                .fetch_child_education(&child_id)
                .map_err(|err| WizardServiceError::Hydration(err.to_string()))?;
            if !education.is_success() {
                return Err(WizardServiceError::Hydration(envelope_message(
                    &education.message,
                )));
            }
            if let Some(data) = education.data {
                hydrate_flat(&mut record, &data, "education_");
            }
        } else {
            debug!(case = %case_id.0, "case payload carries no child key; skipping education fetch");
        }

        let reference = self.load_reference()?;

        let mut state = WizardState::new();
        state.load_record(record);
        // Snapshot only after hydration so pristine edit sessions do not trip
        // the guard.
        let guard = UnsavedChangesGuard::snapshot(state.record());

        info!(case = %case_id.0, "edit session hydrated");
        Ok(WizardSession {
            state,
            guard,
            mode: WizardMode::Edit(case_id),
            reference,
        })
    }

    /// Submit the session's record. Local identifier errors block before any
    /// network call; server outcomes are classified and the session is
    /// retained on every non-success path so the user can correct and retry.
    pub fn submit(
        &self,
        session: &mut WizardSession,
    ) -> Result<SubmissionOutcome, WizardServiceError> {
        if session.state.is_submitting() {
            return Err(WizardServiceError::SubmissionInFlight);
        }

        let local_errors = session.state.identifier_errors();
        if !local_errors.is_empty() {
            let fields: Vec<String> = local_errors.keys().cloned().collect();
            session.state.merge_field_errors(local_errors);
            warn!(?fields, "submission blocked by local identifier check");
            return Err(WizardServiceError::InvalidIdentifiers { fields });
        }

        session.state.set_submitting(true);
        let payload = build_payload(session.state.record());

        let result = match &session.mode {
            WizardMode::Create => self.repository.create_case(&payload),
            WizardMode::Edit(id) => self.repository.update_case(id, &payload),
        };

        let outcome = match result {
            Ok(response) => classify(&response),
            Err(err) => {
                // Transport errors carry no user-facing text; the detail stays
                // in the logs and only the generic message is surfaced.
                warn!(error = %err, "submission transport failure");
                SubmissionOutcome::Fatal(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
        session.state.set_submitting(false);

        match &outcome {
            SubmissionOutcome::Success(_) => {
                session.guard.set_bypass();
                info!("case submission accepted");
            }
            SubmissionOutcome::ValidationFailure { field_errors, .. } => {
                let first_messages = field_errors
                    .iter()
                    .filter_map(|(field, messages)| {
                        messages
                            .first()
                            .map(|message| (field.clone(), message.clone()))
                    })
                    .collect();
                session.state.merge_field_errors(first_messages);
                warn!(fields = field_errors.len(), "server rejected submission");
            }
            SubmissionOutcome::Fatal(message) => {
                warn!(%message, "case submission failed");
            }
        }

        Ok(outcome)
    }

    fn load_reference(&self) -> Result<ReferenceData, WizardServiceError> {
        let banks = self
            .reference
            .banks()
            .map_err(WizardServiceError::ReferenceData)?;
        let regions = self
            .reference
            .regions()
            .map_err(WizardServiceError::ReferenceData)?;
        Ok(ReferenceData { banks, regions })
    }
}

/// Merge a flat JSON object into the record. Wire dates flip to display
/// form; the photo string routes through `Photo::from_raw`; unknown keys are
/// ignored.
fn hydrate_flat(record: &mut FamilyCaseRecord, data: &Value, prefix: &str) {
    let Some(object) = data.as_object() else {
        return;
    };
    for (key, value) in object {
        let name = format!("{prefix}{key}");
        let Some(raw) = scalar_to_string(value) else {
            continue;
        };
        let raw = if is_date_field(&name) {
            to_display_date(&raw)
        } else {
            raw
        };
        record.set_field(&name, &raw);
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn child_key(data: &Value) -> Option<String> {
    data.get("child_id")
        .or_else(|| data.get("child_national_id"))
        .and_then(Value::as_str)
        .filter(|key| !key.trim().is_empty())
        .map(str::to_string)
}

fn envelope_message(message: &Option<String>) -> String {
    message
        .clone()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// Error raised by the wizard service. Hydration and reference-data failures
/// are page-level with user-initiated retry; the in-flight and identifier
/// variants never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardServiceError {
    #[error("failed to load case: {0}")]
    Hydration(String),
    #[error("failed to load reference data: {0}")]
    ReferenceData(RepositoryError),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("identifier fields failed the 16-digit check")]
    InvalidIdentifiers { fields: Vec<String> },
}
