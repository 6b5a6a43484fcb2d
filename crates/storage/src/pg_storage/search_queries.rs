//! SearchQueryStore implementation for PgStorage.

use super::*;

use crate::traits::SearchQueryStore;
use async_trait::async_trait;
use termquery_core::GeneratedSearchQuery;

#[async_trait]
impl SearchQueryStore for PgStorage {
    async fn find_search_query(&self, term: &str) -> Result<Option<SearchQuery>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SEARCH_QUERY_COLUMNS} FROM search_queries WHERE input_term = $1"
        ))
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_search_query).transpose()
    }

    async fn save_generated(
        &self,
        generated: &GeneratedSearchQuery,
        entry_term: &str,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO search_queries (id, input_term, query, ambiguity_reason)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (input_term) DO UPDATE SET updated_at = NOW()
             RETURNING (xmax = 0) AS inserted",
        )
        .bind(new_id())
        .bind(&generated.input_term)
        .bind(&generated.query)
        .bind(&generated.ambiguity_reason)
        .fetch_one(&mut *tx)
        .await?
        .try_get::<bool, _>("inserted")?;

        sqlx::query(UPSERT_ENTRY_SQL)
            .bind(new_id())
            .bind(entry_term)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if inserted {
            tracing::debug!(term = %generated.input_term, "search query inserted");
        } else {
            tracing::debug!(
                term = %generated.input_term,
                "search query already present, refreshed updated_at"
            );
        }
        Ok(())
    }
}
