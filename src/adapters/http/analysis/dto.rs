//! Request and response payloads for the analysis endpoints.

use serde::{Deserialize, Serialize};

use crate::application::AnalyzerInfo;
use crate::domain::analysis::ConsolidatedAnalysis;
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::AnalysisRecord;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Business description as submitted by a client.
///
/// Every field defaults, so an omitted `business_name` is reported as a
/// validation error rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub current_challenges: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
}

impl AnalyzeRequest {
    pub fn into_business(self) -> Result<BusinessDescription, ValidationError> {
        Ok(BusinessDescription::new(&self.business_type, self.business_name)?
            .with_description(self.description.unwrap_or_default())
            .with_challenges(self.current_challenges.unwrap_or_default())
            .with_goals(self.goals.unwrap_or_default())
            .with_website(self.website))
    }
}

/// Body of the single-analyzer endpoints: `{"business_data": {...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SingleAnalyzerRequest {
    #[serde(default)]
    pub business_data: AnalyzeRequest,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub analyzers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerCatalogResponse {
    pub agents: Vec<AnalyzerInfo>,
    pub total: usize,
}

impl From<Vec<AnalyzerInfo>> for AnalyzerCatalogResponse {
    fn from(agents: Vec<AnalyzerInfo>) -> Self {
        Self {
            total: agents.len(),
            agents,
        }
    }
}

/// One entry of the caller's analysis history.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisHistoryItem {
    pub id: String,
    pub business_data: BusinessDescription,
    pub result: ConsolidatedAnalysis,
    pub created_at: Timestamp,
}

impl From<AnalysisRecord> for AnalysisHistoryItem {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            id: record.id.to_string(),
            business_data: record.business,
            result: record.result,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisHistoryResponse {
    pub analyses: Vec<AnalysisHistoryItem>,
    pub total: usize,
}

impl From<Vec<AnalysisRecord>> for AnalysisHistoryResponse {
    fn from(records: Vec<AnalysisRecord>) -> Self {
        let analyses: Vec<AnalysisHistoryItem> = records.into_iter().map(Into::into).collect();
        Self {
            total: analyses.len(),
            analyses,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
