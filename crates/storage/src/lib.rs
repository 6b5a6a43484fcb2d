//! Storage layer for termquery
//!
//! PostgreSQL-backed persistence for keyword entries and their generated
//! search queries, with insert-or-refresh upserts keyed by `input_term`.

mod error;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
pub use traits::{EntryStore, KeywordStore, SearchQueryStore};
