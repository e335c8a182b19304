//! The conditional multi-step family case registration wizard.
//!
//! The engine sequences eleven ordered steps, only one of which (Guardian) is
//! conditionally part of the active path, evaluates branch-dependent
//! required-field sets, guards random-access navigation, assembles the
//! server-bound payload, and intercepts navigation-away while unsaved edits
//! exist. Rendering and HTTP transport live behind the traits in
//! [`repository`].

pub mod domain;
pub mod guard;
pub mod navigator;
pub mod record;
pub mod repository;
pub mod rules;
pub mod service;
pub mod state;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    BranchConditions, CaseId, HouseholdStatus, LocalFileHandle, Photo, SchoolingLevel, WizardStep,
};
pub use guard::UnsavedChangesGuard;
pub use navigator::NavigationError;
pub use record::FamilyCaseRecord;
pub use repository::{
    ApiResponse, BankOption, CaseRepository, ReferenceData, ReferenceDataProvider, RegionOption,
    RepositoryError,
};
pub use service::{CaseWizardService, WizardMode, WizardServiceError, WizardSession};
pub use state::{StepView, WizardState};
pub use submission::{PhotoPart, SubmissionOutcome, SubmissionPayload};
