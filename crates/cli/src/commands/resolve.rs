use std::sync::Arc;

use anyhow::Result;
use termquery_service::SearchQueryService;

use crate::config::{connect_storage, llm_client};

pub(crate) async fn run(term: &str) -> Result<()> {
    let llm = Arc::new(llm_client()?);
    let storage = Arc::new(connect_storage().await?);
    let service = SearchQueryService::new(storage, llm);

    let query = service.get_or_create_search_query(term).await?;
    println!("{}", serde_json::to_string_pretty(&query)?);
    Ok(())
}
