//! Get-or-create resolution of search queries for keyword terms.

use std::sync::Arc;

use termquery_core::{Entry, SearchQuery};
use termquery_llm::{generate_search_query, StructuredGenerator};
use termquery_storage::KeywordStore;

use crate::ServiceError;

pub struct SearchQueryService {
    storage: Arc<dyn KeywordStore>,
    generator: Option<Arc<dyn StructuredGenerator>>,
}

impl std::fmt::Debug for SearchQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQueryService").finish_non_exhaustive()
    }
}

impl SearchQueryService {
    #[must_use]
    pub fn new(storage: Arc<dyn KeywordStore>, generator: Arc<dyn StructuredGenerator>) -> Self {
        Self { storage, generator: Some(generator) }
    }

    /// Read-only service: lookups and cache hits work, generation fails with
    /// [`ServiceError::NotConfigured`].
    #[must_use]
    pub fn without_generator(storage: Arc<dyn KeywordStore>) -> Self {
        Self { storage, generator: None }
    }

    /// Returns the search query for `term`, generating and storing it on first use.
    ///
    /// Every call refreshes the entry for `term`. The generator is only called
    /// when no search query is stored yet; the result is stored under the
    /// caller's term together with its entry in one transaction, then read back.
    /// Concurrent first calls may both generate, but the first committed row wins
    /// and both callers get that row.
    pub async fn get_or_create_search_query(
        &self,
        term: &str,
    ) -> Result<SearchQuery, ServiceError> {
        let term = normalize_term(term)?;

        if let Some(existing) = self.storage.find_search_query(term).await? {
            self.storage.touch_entry(term).await?;
            tracing::debug!(term = %term, "search query already present");
            return Ok(existing);
        }

        let Some(generator) = self.generator.as_deref() else {
            return Err(ServiceError::NotConfigured(format!(
                "no generator available to create a search query for {term:?}"
            )));
        };

        tracing::info!(term = %term, "generating search query");
        let generated = generate_search_query(generator, term).await?;
        if generated.input_term != term {
            tracing::debug!(
                term = %term,
                generated_term = %generated.input_term,
                "generator returned a different term, keeping the caller's"
            );
        }
        let generated = generated.keyed_by(term);

        self.storage.save_generated(&generated, term).await?;

        let stored = self
            .storage
            .find_search_query(term)
            .await?
            .ok_or_else(|| ServiceError::Persistence { term: term.to_owned() })?;

        if stored.query == generated.query {
            tracing::info!(term = %term, query = %stored.query, "search query stored");
        } else {
            tracing::info!(
                term = %term,
                query = %stored.query,
                "search query stored concurrently, discarding this generation"
            );
        }
        Ok(stored)
    }

    /// Looks up a stored search query without refreshing its entry.
    pub async fn find_search_query(
        &self,
        term: &str,
    ) -> Result<Option<SearchQuery>, ServiceError> {
        let term = normalize_term(term)?;
        Ok(self.storage.find_search_query(term).await?)
    }

    pub async fn find_entry(&self, term: &str) -> Result<Option<Entry>, ServiceError> {
        let term = normalize_term(term)?;
        Ok(self.storage.find_entry(term).await?)
    }
}

fn normalize_term(term: &str) -> Result<&str, ServiceError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput("term must not be empty".to_owned()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests;
