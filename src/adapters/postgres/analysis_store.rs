//! PostgreSQL implementation of AnalysisStore.
//!
//! The business description and consolidated result are stored as JSONB so
//! the row keeps exactly what the caller received.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::domain::analysis::ConsolidatedAnalysis;
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::{AnalysisId, Timestamp, UserId};
use crate::ports::{AnalysisRecord, AnalysisStore, StoreAck, StoreError};

/// PostgreSQL implementation of AnalysisStore.
#[derive(Clone)]
pub struct PostgresAnalysisStore {
    pool: PgPool,
}

impl PostgresAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from configuration, running migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect(&config.url)
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to connect: {}", e)))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| StoreError::unavailable(format!("Migration failed: {}", e)))?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AnalysisStore for PostgresAnalysisStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<StoreAck, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO analyses (id, user_id, business_data, result, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.owner_id.as_str())
        .bind(Json(&record.business))
        .bind(Json(&record.result))
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(StoreAck { id: record.id })
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, business_data, result, created_at
            FROM analyses
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch analyses: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            StoreError::rejected(db.message().to_string())
        }
        _ => StoreError::unavailable(format!("Failed to insert analysis: {}", e)),
    }
}

fn row_to_record(row: &PgRow) -> Result<AnalysisRecord, StoreError> {
    let corrupt = |e: sqlx::Error| StoreError::corrupt(e.to_string());

    let id: Uuid = row.try_get("id").map_err(corrupt)?;
    let user_id: String = row.try_get("user_id").map_err(corrupt)?;
    let Json(business): Json<BusinessDescription> = row.try_get("business_data").map_err(corrupt)?;
    let Json(result): Json<ConsolidatedAnalysis> = row.try_get("result").map_err(corrupt)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(corrupt)?;

    Ok(AnalysisRecord {
        id: AnalysisId::from_uuid(id),
        owner_id: UserId::new(user_id).map_err(|e| StoreError::corrupt(e.to_string()))?,
        business,
        result,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_level_errors_are_unavailable() {
        assert!(matches!(
            map_write_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_write_error(sqlx::Error::RowNotFound),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn write_error_message_names_the_operation() {
        let err = map_write_error(sqlx::Error::PoolClosed);
        assert!(err.to_string().contains("Failed to insert analysis"));
    }
}
