//! Service layer for termquery
//!
//! Centralizes the get-or-create flow between callers and storage/llm.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod search_query_service;

pub use error::ServiceError;
pub use search_query_service::SearchQueryService;
