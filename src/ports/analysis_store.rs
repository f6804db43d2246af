//! Analysis store port.
//!
//! The external record store for analysis history. Writes are best-effort:
//! callers spawn them after the response exists and only log failures, so a
//! store outage never changes what the caller receives.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::ConsolidatedAnalysis;
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::{AnalysisId, Timestamp, UserId};

/// One stored analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub owner_id: UserId,
    /// The request exactly as validated.
    pub business: BusinessDescription,
    pub result: ConsolidatedAnalysis,
    pub created_at: Timestamp,
}

impl AnalysisRecord {
    pub fn new(
        owner_id: UserId,
        business: BusinessDescription,
        result: ConsolidatedAnalysis,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: AnalysisId::new(),
            owner_id,
            business,
            result,
            created_at,
        }
    }
}

/// Acknowledgement of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreAck {
    pub id: AnalysisId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Record store rejected the write: {0}")]
    Rejected(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist one analysis.
    ///
    /// # Errors
    ///
    /// - `Unavailable` when the store cannot be reached
    /// - `Rejected` when the store refuses the record
    async fn save(&self, record: &AnalysisRecord) -> Result<StoreAck, StoreError>;

    /// All analyses owned by `owner_id`, newest first.
    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AnalysisRecord>, StoreError>;
}
