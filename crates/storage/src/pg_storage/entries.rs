//! EntryStore implementation for PgStorage.

use super::*;

use crate::traits::EntryStore;
use async_trait::async_trait;

#[async_trait]
impl EntryStore for PgStorage {
    async fn find_entry(&self, term: &str) -> Result<Option<Entry>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE input_term = $1"
        ))
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_entry).transpose()
    }

    async fn touch_entry(&self, term: &str) -> Result<Entry, StorageError> {
        let row = sqlx::query(&format!("{UPSERT_ENTRY_SQL} RETURNING {ENTRY_COLUMNS}"))
            .bind(new_id())
            .bind(term)
            .fetch_one(&self.pool)
            .await?;
        row_to_entry(&row)
    }
}
