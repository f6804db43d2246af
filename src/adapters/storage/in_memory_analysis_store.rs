//! In-Memory Analysis Store Adapter
//!
//! Keeps analysis history in memory. Used for development and tests, and
//! as the default backend when no external store is configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{AnalysisRecord, AnalysisStore, StoreAck, StoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisStore {
    records: Arc<RwLock<Vec<AnalysisRecord>>>,
    /// When set, every call fails with `Unavailable`.
    fail: Arc<AtomicBool>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every call, for exercising best-effort paths.
    pub fn with_failure() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("in-memory store set to fail"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<StoreAck, StoreError> {
        self.check_available()?;
        self.records.write().await.push(record.clone());
        Ok(StoreAck { id: record.id })
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AnalysisRecord>, StoreError> {
        self.check_available()?;
        let mut records: Vec<AnalysisRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| &r.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
