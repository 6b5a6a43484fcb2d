use async_trait::async_trait;
use termquery_core::{GeneratedSearchQuery, SearchQuery};

use crate::error::StorageError;

/// Generated search query operations.
#[async_trait]
pub trait SearchQueryStore: Send + Sync {
    /// Get search query by its input term.
    async fn find_search_query(&self, term: &str) -> Result<Option<SearchQuery>, StorageError>;

    /// Atomically upsert `generated` and the entry for `entry_term`.
    ///
    /// On an `input_term` conflict only `updated_at` is refreshed; stored
    /// query content is never overwritten.
    async fn save_generated(
        &self,
        generated: &GeneratedSearchQuery,
        entry_term: &str,
    ) -> Result<(), StorageError>;
}
