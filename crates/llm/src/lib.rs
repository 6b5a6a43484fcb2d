//! LLM client for SEO search query generation
//!
//! Talks to an OpenAI-compatible chat completions endpoint with structured
//! (JSON schema) output. The [`StructuredGenerator`] trait is the seam the
//! service layer depends on.

mod ai_types;
mod client;
mod error;
mod search_query;
mod structured;

pub use client::{truncate, LlmClient};
pub use error::LlmError;
pub use search_query::{
    generate_search_query, search_query_prompt, search_query_schema, SEARCH_QUERY_SCHEMA_NAME,
    SEARCH_QUERY_SYSTEM_PROMPT,
};
pub use structured::{ObjectRequest, StructuredGenerator};
