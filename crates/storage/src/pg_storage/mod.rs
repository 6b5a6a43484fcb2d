//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by table.

mod entries;
mod search_queries;

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use termquery_core::{
    Entry, SearchQuery, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS,
};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects to `database_url` and applies migrations.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    /// Wraps an existing pool. Migrations are the caller's responsibility.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn row_to_entry(row: &PgRow) -> Result<Entry, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Entry::new(row.try_get("id")?, row.try_get("input_term")?, created_at, updated_at))
}

pub(crate) fn row_to_search_query(row: &PgRow) -> Result<SearchQuery, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(SearchQuery::new(
        row.try_get("id")?,
        row.try_get("input_term")?,
        row.try_get("query")?,
        row.try_get("ambiguity_reason")?,
        created_at,
        updated_at,
    ))
}

pub(crate) const ENTRY_COLUMNS: &str = "id, input_term, created_at, updated_at";

pub(crate) const SEARCH_QUERY_COLUMNS: &str =
    "id, input_term, query, ambiguity_reason, created_at, updated_at";

pub(crate) const UPSERT_ENTRY_SQL: &str = "INSERT INTO entries (id, input_term)
     VALUES ($1, $2)
     ON CONFLICT (input_term) DO UPDATE SET updated_at = NOW()";
