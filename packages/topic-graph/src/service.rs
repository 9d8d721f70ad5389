//! Inbound operations: submit a transcription, read back results.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::builder::TopicGraphBuilder;
use crate::error::{GraphError, Result};
use crate::traits::cache::MindMapCache;
use crate::types::{graph::GraphResult, ids::UserId};

/// Message carried by the validation error for blank submissions.
pub const EMPTY_TRANSCRIPTION: &str = "No transcription provided.";

/// Facade over the builder, the store and the latest-result cache.
#[derive(Clone)]
pub struct MindMapService {
    builder: TopicGraphBuilder,
    cache: Arc<dyn MindMapCache>,
}

impl MindMapService {
    pub fn new(builder: TopicGraphBuilder, cache: Arc<dyn MindMapCache>) -> Self {
        Self { builder, cache }
    }

    pub fn builder(&self) -> &TopicGraphBuilder {
        &self.builder
    }

    /// Build the graph delta for `transcription` and remember it as the
    /// user's latest result.
    ///
    /// A blank transcription is rejected before any provider is called. The
    /// cache is only updated when the run succeeds.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn submit(&self, transcription: &str, user_id: UserId) -> Result<GraphResult> {
        if transcription.trim().is_empty() {
            return Err(GraphError::validation(EMPTY_TRANSCRIPTION));
        }

        let result = self.builder.build(transcription, user_id).await?;
        self.cache.set(user_id, result.clone()).await;

        info!(
            nodes = result.nodes.len(),
            edges = result.edges.len(),
            "Mind map updated"
        );
        Ok(result)
    }

    /// The most recent successful `submit` result for this user.
    pub async fn latest(&self, user_id: UserId) -> Result<GraphResult> {
        self.cache
            .get(user_id)
            .await
            .ok_or(GraphError::NotFound { user_id })
    }

    /// Every stored node and edge for this user.
    pub async fn graph(&self, user_id: UserId) -> Result<GraphResult> {
        self.builder.store().load_graph(user_id).await
    }
}
