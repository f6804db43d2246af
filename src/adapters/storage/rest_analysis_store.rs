//! PostgREST Analysis Store Adapter
//!
//! Writes analyses to a PostgREST endpoint such as the Supabase REST API.
//! Rows use the same columns as the PostgreSQL adapter:
//! `id, user_id, business_data, result, created_at`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::analysis::ConsolidatedAnalysis;
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::{AnalysisId, Timestamp, UserId};
use crate::ports::{AnalysisRecord, AnalysisStore, StoreAck, StoreError};

#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    api_key: Secret<String>,
    pub table: String,
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            table: "analyses".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AnalysisRow {
    id: Uuid,
    user_id: String,
    business_data: BusinessDescription,
    result: ConsolidatedAnalysis,
    created_at: Timestamp,
}

impl From<&AnalysisRecord> for AnalysisRow {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            user_id: record.owner_id.as_str().to_string(),
            business_data: record.business.clone(),
            result: record.result.clone(),
            created_at: record.created_at,
        }
    }
}

impl TryFrom<AnalysisRow> for AnalysisRecord {
    type Error = StoreError;

    fn try_from(row: AnalysisRow) -> Result<Self, Self::Error> {
        Ok(AnalysisRecord {
            id: AnalysisId::from_uuid(row.id),
            owner_id: UserId::new(row.user_id).map_err(|e| StoreError::corrupt(e.to_string()))?,
            business: row.business_data,
            result: row.result,
            created_at: row.created_at,
        })
    }
}

pub struct RestAnalysisStore {
    config: RestStoreConfig,
    client: Client,
}

impl RestAnalysisStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let key = self.config.api_key.expose_secret();
        self.client
            .request(method, self.config.table_url())
            .header("apikey", key)
            .bearer_auth(key)
    }

    fn transport_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::unavailable("request timed out")
        } else if e.is_connect() {
            StoreError::unavailable(format!("Connection failed: {}", e))
        } else {
            StoreError::unavailable(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(StoreError::rejected(format!("{}: {}", status, body)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::rejected(format!("credentials refused ({})", status)))
            }
            _ => Err(StoreError::unavailable(format!("{}: {}", status, body))),
        }
    }
}

#[async_trait]
impl AnalysisStore for RestAnalysisStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<StoreAck, StoreError> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=minimal")
            .json(&AnalysisRow::from(record))
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_status(response).await?;
        Ok(StoreAck { id: record.id })
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AnalysisRecord>, StoreError> {
        let owner_filter = format!("eq.{}", owner_id);
        let response = self
            .request(reqwest::Method::GET)
            .query(&[
                ("select", "*"),
                ("user_id", owner_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(Self::transport_error)?;

        let rows: Vec<AnalysisRow> = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::corrupt(format!("Failed to parse rows: {}", e)))?;

        rows.into_iter().map(AnalysisRecord::try_from).collect()
    }
}
