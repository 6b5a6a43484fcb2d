//! Search query generation: prompt, output schema and validation.

use serde_json::json;
use termquery_core::GeneratedSearchQuery;

use crate::error::LlmError;
use crate::structured::{ObjectRequest, StructuredGenerator};

pub const SEARCH_QUERY_SCHEMA_NAME: &str = "search_query";

pub const SEARCH_QUERY_SYSTEM_PROMPT: &str = "You are a Senior Content Writer who specialises in writing technical content for Developer Tools that are SEO optimized.
For every term, you conduct a search on Google to gather the data you need.
You're goal is to create a search query that will return a SERP with the most relevant information for the term.

Make sure to always include the exact term in the search query at the beginning of the query.
If the term is clearly associated to API development, use the term as-is for query.

If the term is ambiguous with non-API development related fields and could result in unrelated results, add context to the search query to clarify the search & return the reason for the ambiguity.

Keep the search query as short and as simple as possible, don't use quotes around the search query.

";

/// Per-call prompt embedding the term.
#[must_use]
pub fn search_query_prompt(term: &str) -> String {
    format!("Create the search query for the term \"{term}.\"")
}

/// JSON schema of [`GeneratedSearchQuery`]. Timestamps and ids are server-assigned.
#[must_use]
pub fn search_query_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "input_term": {
                "type": "string",
                "description": "The term the search query was created for"
            },
            "query": {
                "type": "string",
                "description": "The search query, starting with the exact term"
            },
            "ambiguity_reason": {
                "type": ["string", "null"],
                "description": "Why the term is ambiguous, or null if it is not"
            }
        },
        "required": ["input_term", "query", "ambiguity_reason"],
        "additionalProperties": false
    })
}

/// Generates and validates a search query for `term`.
///
/// # Errors
/// Propagates generator failures; returns `JsonParse` when the object does not
/// match the schema and `InvalidOutput` when the query is empty.
pub async fn generate_search_query<G>(
    generator: &G,
    term: &str,
) -> Result<GeneratedSearchQuery, LlmError>
where
    G: StructuredGenerator + ?Sized,
{
    let request = ObjectRequest {
        system: SEARCH_QUERY_SYSTEM_PROMPT,
        prompt: search_query_prompt(term),
        schema_name: SEARCH_QUERY_SCHEMA_NAME,
        schema: search_query_schema(),
    };
    let value = generator.generate_object(&request).await?;
    let generated: GeneratedSearchQuery =
        serde_json::from_value(value).map_err(|e| LlmError::JsonParse {
            context: format!("{SEARCH_QUERY_SCHEMA_NAME} object for term {term:?}"),
            source: e,
        })?;
    normalize(generated)
}

fn normalize(generated: GeneratedSearchQuery) -> Result<GeneratedSearchQuery, LlmError> {
    let query = unquote(generated.query.trim());
    if query.is_empty() {
        return Err(LlmError::InvalidOutput("generated search query is empty".to_owned()));
    }
    let input_term = generated.input_term.trim();
    if input_term.is_empty() {
        return Err(LlmError::MissingField("input_term".to_owned()));
    }
    let ambiguity_reason = generated
        .ambiguity_reason
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty());
    Ok(GeneratedSearchQuery::new(input_term.to_owned(), query.to_owned(), ambiguity_reason))
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”')).trim()
}
