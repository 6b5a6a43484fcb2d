use std::sync::Arc;

use anyhow::Result;
use termquery_service::SearchQueryService;

use crate::config::connect_storage;

pub(crate) async fn run(term: &str) -> Result<()> {
    let storage = Arc::new(connect_storage().await?);
    let service = SearchQueryService::without_generator(storage);

    match service.find_search_query(term).await? {
        Some(query) => {
            println!("{}", serde_json::to_string_pretty(&query)?);
            if let Some(entry) = service.find_entry(term).await? {
                tracing::info!(term = %term, last_seen = %entry.updated_at, "entry found");
            }
        },
        None => println!("Search query not found: {term}"),
    }
    Ok(())
}
