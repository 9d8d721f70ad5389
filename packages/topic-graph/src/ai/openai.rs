//! OpenAI implementation of the provider traits.
//!
//! Chat completions with a strict `json_schema` response format for topic
//! extraction, and `text-embedding-3-small` for embeddings. Requests are
//! sent once; failures surface to the caller without retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use topic_graph::ai::OpenAI;
//!
//! let ai = Arc::new(OpenAI::from_env()?.with_model("gpt-4o-mini"));
//! let builder = TopicGraphBuilder::new(store, ai.clone(), ai);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::ai::schema::strict_schema;
use crate::error::{GraphError, Result};
use crate::prompts::{format_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use crate::traits::ai::{EmbeddingService, TopicExtractor};
use crate::types::document::{parse_topic_document, TopicDocument};

/// OpenAI-based topic extractor and embedding service.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    model: String,
    embedding_model: String,
    base_url: String,
}

impl OpenAI {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| GraphError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the embedding model (default: text-embedding-3-small).
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Chat completion constrained to the `TopicDocument` schema.
    async fn structured_completion(&self, system: &str, user: &str) -> Result<String> {
        let request = StructuredRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "topic_document".to_string(),
                    strict: true,
                    schema: strict_schema::<TopicDocument>(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(GraphError::extraction)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GraphError::extraction(format!(
                "OpenAI chat error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(GraphError::extraction)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GraphError::extraction("No response from OpenAI"))
    }
}

#[async_trait]
impl TopicExtractor for OpenAI {
    #[instrument(skip_all, fields(model = %self.model, existing = existing_main_topics.len()))]
    async fn extract(
        &self,
        transcription: &str,
        existing_main_topics: &[String],
    ) -> Result<TopicDocument> {
        let prompt = format_extraction_prompt(transcription, existing_main_topics);
        let raw = self
            .structured_completion(EXTRACTION_SYSTEM_PROMPT, &prompt)
            .await?;

        debug!(response_len = raw.len(), "Extraction response received");
        parse_topic_document(&raw)
    }
}

#[async_trait]
impl EmbeddingService for OpenAI {
    #[instrument(skip_all, fields(model = %self.embedding_model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(GraphError::embedding)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GraphError::embedding(format!(
                "OpenAI embedding error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse =
            response.json().await.map_err(GraphError::embedding)?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| GraphError::embedding("No embedding returned"))
    }
}

// Request/Response types

#[derive(Serialize)]
struct StructuredRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_builder() {
        let ai = OpenAI::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_embedding_model("text-embedding-3-large")
            .with_base_url("https://custom.api.com");

        assert_eq!(ai.model(), "gpt-4o-mini");
        assert_eq!(ai.embedding_model(), "text-embedding-3-large");
        assert_eq!(ai.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_request_uses_strict_json_schema() {
        let request = StructuredRequest {
            model: "gpt-4o".into(),
            messages: vec![],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".into(),
                json_schema: JsonSchemaFormat {
                    name: "topic_document".into(),
                    strict: true,
                    schema: strict_schema::<TopicDocument>(),
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);
        assert_eq!(json["temperature"], 0.0);
    }
}
