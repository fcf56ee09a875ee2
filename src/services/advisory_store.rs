//! Advisory history store implementations
//!
//! The SQLite store is the production backend; the in-memory store backs
//! tests that need a working history without a database file. Both assign
//! ids and creation timestamps at write time and return records for one
//! farmer in insertion order.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::traits::AdvisoryStore;
use crate::types::{AdvisoryRecord, NewAdvisoryRecord, RecommendationKind};

/// SQLite-backed advisory store
#[derive(Debug, Clone)]
pub struct SqliteAdvisoryStore {
    pool: SqlitePool,
}

impl SqliteAdvisoryStore {
    /// Connect to the database, creating the file if missing.
    ///
    /// `sqlite::memory:` yields an ephemeral store.
    pub async fn connect(database_url: &str) -> AdvisoryResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // A single connection: writes are serialized at the storage level,
        // and `sqlite::memory:` databases are per-connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl AdvisoryStore for SqliteAdvisoryStore {
    async fn initialize(&self) -> AdvisoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS advisory_records (
                id TEXT PRIMARY KEY,
                farmer_uid TEXT NOT NULL,
                land_parcel_id INTEGER,
                recommendation_kind TEXT NOT NULL,
                recommendation_data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("advisory store initialized");
        Ok(())
    }

    async fn save(&self, record: NewAdvisoryRecord) -> AdvisoryResult<AdvisoryRecord> {
        let stored = AdvisoryRecord {
            id: Uuid::new_v4(),
            farmer_uid: record.farmer_uid,
            land_parcel_id: record.land_parcel_id,
            kind: record.kind,
            recommendation_data: record.recommendation_data,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO advisory_records
                (id, farmer_uid, land_parcel_id, recommendation_kind, recommendation_data, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(stored.id.to_string())
        .bind(&stored.farmer_uid)
        .bind(stored.land_parcel_id)
        .bind(stored.kind.as_str())
        .bind(&stored.recommendation_data)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find_by_farmer(&self, farmer_uid: &str) -> AdvisoryResult<Vec<AdvisoryRecord>> {
        let rows: Vec<(String, String, Option<i64>, String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, farmer_uid, land_parcel_id, recommendation_kind, recommendation_data, created_at
            FROM advisory_records
            WHERE farmer_uid = ?1
            ORDER BY rowid
            "#,
        )
        .bind(farmer_uid)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(raw_id, farmer_uid, land_parcel_id, raw_kind, recommendation_data, created_at)| {
                let id = Uuid::parse_str(&raw_id)
                    .map_err(|e| AdvisoryError::persistence(format!("invalid record id `{raw_id}`: {e}")))?;
                let kind = RecommendationKind::parse(&raw_kind)
                    .ok_or_else(|| AdvisoryError::persistence(format!("unknown recommendation kind `{raw_kind}`")))?;

                Ok(AdvisoryRecord {
                    id,
                    farmer_uid,
                    land_parcel_id,
                    kind,
                    recommendation_data,
                    created_at,
                })
            })
            .collect()
    }

    async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// In-memory advisory store for tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdvisoryStore {
    records: Arc<RwLock<Vec<AdvisoryRecord>>>,
}

impl InMemoryAdvisoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total record count across all farmers
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl AdvisoryStore for InMemoryAdvisoryStore {
    async fn initialize(&self) -> AdvisoryResult<()> {
        Ok(())
    }

    async fn save(&self, record: NewAdvisoryRecord) -> AdvisoryResult<AdvisoryRecord> {
        let stored = AdvisoryRecord {
            id: Uuid::new_v4(),
            farmer_uid: record.farmer_uid,
            land_parcel_id: record.land_parcel_id,
            kind: record.kind,
            recommendation_data: record.recommendation_data,
            created_at: Utc::now(),
        };

        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_farmer(&self, farmer_uid: &str) -> AdvisoryResult<Vec<AdvisoryRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| record.farmer_uid == farmer_uid)
            .cloned()
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
