use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::CaseId;
use super::submission::SubmissionPayload;

/// Response envelope shared by every case endpoint. HTTP 422 specifically
/// signals that `errors` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.success && (200..300).contains(&self.status)
    }
}

/// Transport abstraction over the case endpoints so the wizard service can be
/// exercised in isolation. Calls block to completion; the engine never issues
/// a second request before the previous one resolves.
pub trait CaseRepository: Send + Sync {
    fn fetch_case(&self, id: &CaseId) -> Result<ApiResponse, RepositoryError>;
    fn fetch_child_education(&self, child_id: &str) -> Result<ApiResponse, RepositoryError>;
    fn create_case(&self, payload: &SubmissionPayload) -> Result<ApiResponse, RepositoryError>;
    fn update_case(
        &self,
        id: &CaseId,
        payload: &SubmissionPayload,
    ) -> Result<ApiResponse, RepositoryError>;
}

/// Bank and region lists fetched once before the household step is usable.
pub trait ReferenceDataProvider: Send + Sync {
    fn banks(&self) -> Result<Vec<BankOption>, RepositoryError>;
    fn regions(&self) -> Result<Vec<RegionOption>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Reference data held by a running session.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub banks: Vec<BankOption>,
    pub regions: Vec<RegionOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("case not found")]
    NotFound,
    #[error("service unavailable: {0}")]
    Unavailable(String),
}
