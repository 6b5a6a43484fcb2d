//! Storage backend trait abstraction
//!
//! Async domain traits for keyword persistence. Services depend on
//! `Arc<dyn KeywordStore>` so that tests can inject in-memory fakes.

pub mod entry;
pub mod search_query;

pub use entry::EntryStore;
pub use search_query::SearchQueryStore;

/// Everything the search query resolver needs from persistence.
pub trait KeywordStore: SearchQueryStore + EntryStore {}

impl<T: SearchQueryStore + EntryStore> KeywordStore for T {}
