#![allow(clippy::unwrap_used, reason = "test code")]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use termquery_core::GeneratedSearchQuery;
use termquery_llm::{LlmError, ObjectRequest};
use termquery_storage::StorageError;
use termquery_storage::traits::{EntryStore, SearchQueryStore};

use super::*;

/// In-memory store with the same upsert semantics as the PostgreSQL backend.
#[derive(Default)]
struct MemoryStore {
    search_queries: Mutex<HashMap<String, SearchQuery>>,
    entries: Mutex<HashMap<String, Entry>>,
    /// Simulates a commit that never becomes visible to reads.
    hide_search_queries: AtomicBool,
    fail_writes: AtomicBool,
    next_id: AtomicUsize,
}

impl MemoryStore {
    fn id(&self) -> String {
        format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn upsert_entry(&self, entries: &mut HashMap<String, Entry>, term: &str) -> Entry {
        let now = Utc::now();
        let entry = entries
            .entry(term.to_owned())
            .and_modify(|e| e.updated_at = now.max(e.updated_at))
            .or_insert_with(|| Entry::new(self.id(), term.to_owned(), now, now));
        entry.clone()
    }

    fn search_query_count(&self) -> usize {
        self.search_queries.lock().unwrap().len()
    }

    fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn entry(&self, term: &str) -> Option<Entry> {
        self.entries.lock().unwrap().get(term).cloned()
    }

    fn seed(&self, term: &str, query: &str) {
        let now = Utc::now();
        self.search_queries.lock().unwrap().insert(
            term.to_owned(),
            SearchQuery::new(self.id(), term.to_owned(), query.to_owned(), None, now, now),
        );
    }
}

#[async_trait]
impl SearchQueryStore for MemoryStore {
    async fn find_search_query(&self, term: &str) -> Result<Option<SearchQuery>, StorageError> {
        if self.hide_search_queries.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.search_queries.lock().unwrap().get(term).cloned())
    }

    async fn save_generated(
        &self,
        generated: &GeneratedSearchQuery,
        entry_term: &str,
    ) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Duplicate("simulated constraint violation".to_owned()));
        }
        let mut search_queries = self.search_queries.lock().unwrap();
        let mut entries = self.entries.lock().unwrap();
        let now = Utc::now();
        search_queries
            .entry(generated.input_term.clone())
            .and_modify(|q| q.updated_at = now.max(q.updated_at))
            .or_insert_with(|| {
                SearchQuery::new(
                    self.id(),
                    generated.input_term.clone(),
                    generated.query.clone(),
                    generated.ambiguity_reason.clone(),
                    now,
                    now,
                )
            });
        self.upsert_entry(&mut entries, entry_term);
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn find_entry(&self, term: &str) -> Result<Option<Entry>, StorageError> {
        Ok(self.entry(term))
    }

    async fn touch_entry(&self, term: &str) -> Result<Entry, StorageError> {
        let mut entries = self.entries.lock().unwrap();
        Ok(self.upsert_entry(&mut entries, term))
    }
}

enum Behavior {
    /// Query is the term, suffixed with the call number after the first call.
    Echo,
    /// Returns a lowercased `input_term`, as a normalizing model might.
    Lowercase,
    Fail,
}

struct FakeGenerator {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeGenerator {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self { behavior, calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn term_from_prompt(prompt: &str) -> &str {
    prompt
        .strip_prefix("Create the search query for the term \"")
        .and_then(|rest| rest.strip_suffix(".\""))
        .unwrap()
}

#[async_trait]
impl StructuredGenerator for FakeGenerator {
    async fn generate_object(
        &self,
        request: &ObjectRequest<'_>,
    ) -> Result<serde_json::Value, LlmError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        // Lets concurrent callers interleave between lookup and persist.
        tokio::task::yield_now().await;
        let term = term_from_prompt(&request.prompt);
        match self.behavior {
            Behavior::Echo => {
                let query = if call == 1 { term.to_owned() } else { format!("{term} v{call}") };
                Ok(serde_json::json!({
                    "input_term": term,
                    "query": query,
                    "ambiguity_reason": null
                }))
            },
            Behavior::Lowercase => Ok(serde_json::json!({
                "input_term": term.to_lowercase(),
                "query": format!("{term} developer documentation"),
                "ambiguity_reason": "could refer to a non-software topic"
            })),
            Behavior::Fail => Err(LlmError::HttpStatus { code: 504, body: "timeout".to_owned() }),
        }
    }
}

fn service(store: &Arc<MemoryStore>, generator: &Arc<FakeGenerator>) -> SearchQueryService {
    SearchQueryService::new(store.clone(), generator.clone())
}

const TERM: &str = "API Rate Limiting";

#[tokio::test]
async fn test_unseen_term_creates_query_and_entry() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);

    let query = service(&store, &generator).get_or_create_search_query(TERM).await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(query.input_term, TERM);
    assert!(query.query.starts_with(TERM));
    assert_eq!(store.search_query_count(), 1);
    assert_eq!(store.entry_count(), 1);
    assert_eq!(store.entry(TERM).unwrap().input_term, TERM);
}

#[tokio::test]
async fn test_seen_term_skips_generation_and_refreshes_entry() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);
    let svc = service(&store, &generator);

    let first = svc.get_or_create_search_query(TERM).await.unwrap();
    let entry_before = store.entry(TERM).unwrap();
    let second = svc.get_or_create_search_query(TERM).await.unwrap();
    let entry_after = store.entry(TERM).unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(entry_before.id, entry_after.id);
    assert!(entry_after.updated_at >= entry_before.updated_at);
}

#[tokio::test]
async fn test_present_term_never_calls_generator() {
    let store = Arc::new(MemoryStore::default());
    store.seed(TERM, "API Rate Limiting");
    let generator = FakeGenerator::new(Behavior::Fail);

    let query = service(&store, &generator).get_or_create_search_query(TERM).await.unwrap();

    assert_eq!(generator.calls(), 0);
    assert_eq!(query.query, "API Rate Limiting");
    assert!(store.entry(TERM).is_some(), "cache hits are still tracked");
}

#[tokio::test]
async fn test_repeated_calls_keep_one_row() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);
    let svc = service(&store, &generator);

    let mut last_updated = None;
    for _ in 0..5 {
        svc.get_or_create_search_query(TERM).await.unwrap();
        let updated_at = store.entry(TERM).unwrap().updated_at;
        if let Some(previous) = last_updated {
            assert!(updated_at >= previous);
        }
        last_updated = Some(updated_at);
    }

    assert_eq!(generator.calls(), 1);
    assert_eq!(store.search_query_count(), 1);
    assert_eq!(store.entry_count(), 1);
}

#[tokio::test]
async fn test_concurrent_first_calls_converge() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);
    let svc = service(&store, &generator);

    let (a, b) = tokio::join!(
        svc.get_or_create_search_query(TERM),
        svc.get_or_create_search_query(TERM)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(generator.calls(), 2, "both callers missed the lookup");
    assert_eq!(store.search_query_count(), 1);
    assert_eq!(a.input_term, TERM);
    assert_eq!(b.input_term, TERM);
    assert_eq!(a.query, b.query, "first committed content wins");
    assert_eq!(a.id, b.id);
}

#[tokio::test]
async fn test_generation_failure_writes_nothing() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Fail);

    let err = service(&store, &generator).get_or_create_search_query(TERM).await.unwrap_err();

    assert!(matches!(err, ServiceError::Generation(_)));
    assert!(!err.is_transient(), "504 is not in the transient set");
    assert_eq!(store.search_query_count(), 0);
    assert_eq!(store.entry_count(), 0);
}

#[tokio::test]
async fn test_read_back_miss_is_persistence_error() {
    let store = Arc::new(MemoryStore::default());
    store.hide_search_queries.store(true, Ordering::SeqCst);
    let generator = FakeGenerator::new(Behavior::Echo);

    let err = service(&store, &generator).get_or_create_search_query(TERM).await.unwrap_err();

    assert!(err.is_persistence_inconsistency());
    assert!(err.to_string().contains(TERM));
}

#[tokio::test]
async fn test_storage_errors_propagate() {
    let store = Arc::new(MemoryStore::default());
    store.fail_writes.store(true, Ordering::SeqCst);
    let generator = FakeGenerator::new(Behavior::Echo);

    let err = service(&store, &generator).get_or_create_search_query(TERM).await.unwrap_err();

    assert!(matches!(err, ServiceError::Storage(StorageError::Duplicate(_))));
}

#[tokio::test]
async fn test_generator_term_does_not_change_key() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Lowercase);
    let svc = service(&store, &generator);

    let first = svc.get_or_create_search_query("Token").await.unwrap();
    let second = svc.get_or_create_search_query("Token").await.unwrap();

    assert_eq!(first.input_term, "Token");
    assert_eq!(first.query, "Token developer documentation");
    assert!(first.is_ambiguous());
    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_empty_term_rejected_before_io() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);

    let err = service(&store, &generator).get_or_create_search_query("   ").await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(generator.calls(), 0);
    assert_eq!(store.entry_count(), 0);
}

#[tokio::test]
async fn test_surrounding_whitespace_is_trimmed() {
    let store = Arc::new(MemoryStore::default());
    let generator = FakeGenerator::new(Behavior::Echo);
    let svc = service(&store, &generator);

    svc.get_or_create_search_query("  Webhooks ").await.unwrap();
    svc.get_or_create_search_query("Webhooks").await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert!(store.entry("Webhooks").is_some());
}

#[tokio::test]
async fn test_find_does_not_touch_entry_or_generate() {
    let store = Arc::new(MemoryStore::default());
    store.seed(TERM, "API Rate Limiting");
    let generator = FakeGenerator::new(Behavior::Echo);
    let svc = service(&store, &generator);

    assert!(svc.find_search_query(TERM).await.unwrap().is_some());
    assert!(svc.find_search_query("unknown").await.unwrap().is_none());
    assert!(svc.find_entry(TERM).await.unwrap().is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_without_generator_serves_stored_query() {
    let store = Arc::new(MemoryStore::default());
    store.seed(TERM, "API Rate Limiting best practices");
    let svc = SearchQueryService::without_generator(store.clone());

    let query = svc.get_or_create_search_query(TERM).await.unwrap();

    assert_eq!(query.query, "API Rate Limiting best practices");
    assert!(store.entry(TERM).is_some());
}

#[tokio::test]
async fn test_without_generator_miss_is_not_configured() {
    let store = Arc::new(MemoryStore::default());
    let svc = SearchQueryService::without_generator(store.clone());

    let err = svc.get_or_create_search_query(TERM).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotConfigured(_)));
    assert!(!err.is_transient());
    assert_eq!(store.search_query_count(), 0);
    assert_eq!(store.entry_count(), 0);
    assert!(svc.find_search_query(TERM).await.unwrap().is_none());
}
