//! Shared constants for termquery.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default chat model for search query generation.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default HTTP timeout for a single generation request, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Default number of retries for transient generation failures.
pub const DEFAULT_LLM_MAX_RETRIES: usize = 3;
