//! Server dependencies (using traits for testability)
//!
//! Every external collaborator sits behind a `topic_graph` trait so tests can
//! swap in mocks and the memory store.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use topic_graph::ai::OpenAI;
use topic_graph::{
    BuilderConfig, EmbeddingService, GraphStore, MemoryGraphStore, MemoryMindMapCache,
    MindMapCache, MindMapService, PostgresGraphStore, TopicExtractor, TopicGraphBuilder,
};

use crate::config::Config;

/// Dependencies shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn GraphStore>,
    pub extractor: Arc<dyn TopicExtractor>,
    pub embedder: Arc<dyn EmbeddingService>,
    pub cache: Arc<dyn MindMapCache>,
    pub builder_config: BuilderConfig,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn GraphStore>,
        extractor: Arc<dyn TopicExtractor>,
        embedder: Arc<dyn EmbeddingService>,
        cache: Arc<dyn MindMapCache>,
        builder_config: BuilderConfig,
    ) -> Self {
        Self {
            store,
            extractor,
            embedder,
            cache,
            builder_config,
        }
    }

    /// Wire production dependencies: OpenAI for both providers, PostgreSQL
    /// when `DATABASE_URL` is set and the memory store otherwise.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let ai = Arc::new(
            OpenAI::new(config.openai_api_key.clone())
                .with_model(config.chat_model.clone())
                .with_embedding_model(config.embedding_model.clone()),
        );

        let store: Arc<dyn GraphStore> = match &config.database_url {
            Some(url) => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("Failed to connect to database")?;
                let store = PostgresGraphStore::from_pool(pool)
                    .await
                    .context("Failed to prepare graph schema")?;
                tracing::info!("Database connected");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, graph is kept in memory only");
                Arc::new(MemoryGraphStore::new())
            }
        };

        Ok(Self::new(
            store,
            ai.clone(),
            ai,
            Arc::new(MemoryMindMapCache::new()),
            config.builder.clone(),
        ))
    }

    pub fn mind_map_service(&self) -> MindMapService {
        let builder = TopicGraphBuilder::with_config(
            self.store.clone(),
            self.extractor.clone(),
            self.embedder.clone(),
            self.builder_config.clone(),
        );
        MindMapService::new(builder, self.cache.clone())
    }
}
