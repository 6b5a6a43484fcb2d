//! PostgreSQL schema migrations for termquery storage.

use sqlx::PgPool;

use crate::error::StorageError;

/// Run all PostgreSQL migrations. Every statement is idempotent.
///
/// Any failing statement surfaces as [`StorageError::Migration`] with the
/// underlying `sqlx::Error` kept as its source.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    apply_schema(pool).await.map_err(StorageError::Migration)?;
    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}

async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id TEXT PRIMARY KEY,
            input_term TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_input_term ON entries (input_term)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS search_queries (
            id TEXT PRIMARY KEY,
            input_term TEXT NOT NULL,
            query TEXT NOT NULL,
            ambiguity_reason TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_search_queries_input_term ON search_queries (input_term)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_entries_updated ON entries (updated_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
