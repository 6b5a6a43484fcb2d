//! Typed error enum for the service layer.
//!
//! Unifies storage and LLM failures into a single error type, so callers can
//! tell a failed generation apart from a write that did not become visible.

use termquery_llm::LlmError;
use termquery_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage and generation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, connection, constraint).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// The generation call failed or returned output that did not fit the schema.
    #[error("generation: {0}")]
    Generation(#[from] LlmError),

    /// A committed search query could not be read back.
    #[error("persistence: search query for term {term:?} not visible after commit")]
    Persistence { term: String },

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Generation was needed but the service was built without a generator.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying by the caller).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Generation(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether a write succeeded but its result was not visible afterwards.
    pub fn is_persistence_inconsistency(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
