//! Environment-driven configuration for the binary.

use std::time::Duration;

use anyhow::Result;
use termquery_core::{
    env_parse_with_default, DEFAULT_API_URL, DEFAULT_LLM_MAX_RETRIES, DEFAULT_LLM_TIMEOUT_SECS,
    DEFAULT_MODEL,
};
use termquery_llm::LlmClient;
use termquery_storage::PgStorage;

pub(crate) fn database_url() -> Result<String> {
    std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))
}

pub(crate) fn api_key() -> Result<String> {
    std::env::var("TERMQUERY_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| {
            anyhow::anyhow!("TERMQUERY_API_KEY or OPENAI_API_KEY environment variable must be set")
        })
}

pub(crate) fn base_url() -> String {
    std::env::var("TERMQUERY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned())
}

pub(crate) fn model() -> String {
    std::env::var("TERMQUERY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned())
}

pub(crate) async fn connect_storage() -> Result<PgStorage> {
    let url = database_url()?;
    Ok(PgStorage::new(&url).await?)
}

pub(crate) fn llm_client() -> Result<LlmClient> {
    let timeout_secs = env_parse_with_default("TERMQUERY_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS);
    let max_retries = env_parse_with_default("TERMQUERY_LLM_MAX_RETRIES", DEFAULT_LLM_MAX_RETRIES);
    let client = LlmClient::with_timeout(api_key()?, base_url(), Duration::from_secs(timeout_secs))?
        .with_model(model())
        .with_max_retries(max_retries);
    tracing::debug!(model = %client.model(), base_url = %client.base_url(), "LLM client configured");
    Ok(client)
}
