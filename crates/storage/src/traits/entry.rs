use async_trait::async_trait;
use termquery_core::Entry;

use crate::error::StorageError;

/// Term tracking operations.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Get entry by term.
    async fn find_entry(&self, term: &str) -> Result<Option<Entry>, StorageError>;

    /// Insert an entry for `term`, or refresh `updated_at` if one exists.
    async fn touch_entry(&self, term: &str) -> Result<Entry, StorageError>;
}
