//! Keyword entry and search query types.
//!
//! An [`Entry`] records that a term was looked up; a [`SearchQuery`] is the
//! canonical generated query for that term. Both are keyed by `input_term`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tracking record for a looked-up term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    /// Natural key, unique across entries.
    pub input_term: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every lookup of the term.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    #[must_use]
    pub fn new(
        id: String,
        input_term: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self { id, input_term, created_at, updated_at }
    }
}

/// Canonical generated search query for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub id: String,
    /// Unique key; at most one search query exists per term.
    pub input_term: String,
    /// Generated query text, starting with the term.
    pub query: String,
    /// Why the term was considered ambiguous, when it was.
    pub ambiguity_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(
        id: String,
        input_term: String,
        query: String,
        ambiguity_reason: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self { id, input_term, query, ambiguity_reason, created_at, updated_at }
    }

    /// Whether the generator flagged the term as ambiguous.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity_reason.is_some()
    }
}

/// Object returned by the generator. Ids and timestamps are server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSearchQuery {
    pub input_term: String,
    pub query: String,
    #[serde(default)]
    pub ambiguity_reason: Option<String>,
}

impl GeneratedSearchQuery {
    #[must_use]
    pub fn new(input_term: String, query: String, ambiguity_reason: Option<String>) -> Self {
        Self { input_term, query, ambiguity_reason }
    }

    /// Returns a copy keyed by `term` instead of the generator's own term.
    #[must_use]
    pub fn keyed_by(mut self, term: &str) -> Self {
        term.clone_into(&mut self.input_term);
        self
    }
}
