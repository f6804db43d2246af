//! Errors surfaced by the analysis handlers.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | UnknownAnalyzer | 404 |
//! | TotalFailure | 500 |
//! | HistoryUnavailable | 503 |

use thiserror::Error;

use crate::domain::analyzers::AnalyzerKind;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The request was rejected before orchestration started.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Every analyzer failed and the configured policy forbids a fallback.
    #[error("All {analyzers} analyzers failed")]
    TotalFailure { analyzers: usize },

    #[error("Analyzer '{0}' is not registered")]
    UnknownAnalyzer(AnalyzerKind),

    /// History reads are not best-effort, so store errors surface here.
    #[error("Analysis history unavailable: {0}")]
    HistoryUnavailable(#[from] StoreError),
}

impl AnalysisError {
    pub fn total_failure(analyzers: usize) -> Self {
        AnalysisError::TotalFailure { analyzers }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Validation(_) => ErrorCode::ValidationFailed,
            AnalysisError::TotalFailure { .. } => ErrorCode::TotalAnalysisFailure,
            AnalysisError::UnknownAnalyzer(_) => ErrorCode::AnalyzerNotFound,
            AnalysisError::HistoryUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }
}
