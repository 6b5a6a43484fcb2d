//! Structured (schema-constrained) generation capability.

use async_trait::async_trait;
use termquery_core::strip_markdown_json;

use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::client::{truncate, LlmClient};
use crate::error::LlmError;

/// One schema-constrained generation call.
#[derive(Debug, Clone)]
pub struct ObjectRequest<'a> {
    pub system: &'a str,
    pub prompt: String,
    pub schema_name: &'a str,
    /// JSON schema the returned object must satisfy.
    pub schema: serde_json::Value,
}

/// Produces a JSON object for a system instruction, prompt and schema.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate_object(
        &self,
        request: &ObjectRequest<'_>,
    ) -> Result<serde_json::Value, LlmError>;
}

#[async_trait]
impl StructuredGenerator for LlmClient {
    async fn generate_object(
        &self,
        request: &ObjectRequest<'_>,
    ) -> Result<serde_json::Value, LlmError> {
        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(request.system), Message::user(&request.prompt)],
            response_format: ResponseFormat::json_schema(
                request.schema_name,
                request.schema.clone(),
            ),
        };

        let content = self.chat_completion(&chat_request).await?;
        let json = strip_markdown_json(&content);
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| LlmError::JsonParse {
                context: format!("{} object (content: {})", request.schema_name, truncate(json, 300)),
                source: e,
            })?;
        if !value.is_object() {
            return Err(LlmError::InvalidOutput(format!(
                "expected a JSON object for {}, got: {}",
                request.schema_name,
                truncate(json, 100)
            )));
        }
        Ok(value)
    }
}
