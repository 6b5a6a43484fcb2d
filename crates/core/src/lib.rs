//! Core types and helpers for termquery
//!
//! Domain types shared across the storage, LLM and service crates.

mod constants;
mod env_config;
mod json_utils;
mod search_query;
pub mod table;

pub use constants::*;
pub use env_config::*;
pub use json_utils::*;
pub use search_query::*;
