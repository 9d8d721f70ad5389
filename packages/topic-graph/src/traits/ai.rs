//! Provider traits for the two external models the engine consults.
//!
//! Both are treated as pure, possibly failing functions. Implementations
//! must not retry internally; a failure surfaces to the builder as-is.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::TopicDocument;

/// Splits a transcription into a main topic → subtopic → detail tree.
#[async_trait]
pub trait TopicExtractor: Send + Sync {
    /// Extract the topic tree for `transcription`.
    ///
    /// `existing_main_topics` lists the user's current main topic names so the
    /// model can reuse them instead of inventing near-duplicates.
    ///
    /// Fails with `GraphError::Extraction` when the provider errors or the
    /// response does not parse as a `TopicDocument`.
    async fn extract(
        &self,
        transcription: &str,
        existing_main_topics: &[String],
    ) -> Result<TopicDocument>;
}

/// Maps short text to a fixed-length vector.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Fails with `GraphError::Embedding`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
