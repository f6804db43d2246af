//! ListAnalysesHandler - Query handler for the caller's history.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::UserId;
use crate::ports::{AnalysisRecord, AnalysisStore};

use super::AnalysisError;

#[derive(Debug, Clone)]
pub struct ListAnalysesQuery {
    pub owner: UserId,
}

pub struct ListAnalysesHandler {
    store: Arc<dyn AnalysisStore>,
}

impl ListAnalysesHandler {
    pub fn new(store: Arc<dyn AnalysisStore>) -> Self {
        Self { store }
    }

    /// Stored analyses for the owner, newest first.
    pub async fn handle(&self, query: ListAnalysesQuery) -> Result<Vec<AnalysisRecord>, AnalysisError> {
        let mut records = self
            .store
            .list_for_owner(&query.owner)
            .await
            .map_err(|e| {
                warn!(error = %e, owner_id = %query.owner, "failed to load analysis history");
                AnalysisError::from(e)
            })?;

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
