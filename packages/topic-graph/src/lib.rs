//! Topic graph engine for mind maps.
//!
//! Turns free-text transcriptions into a per-user graph of main topics and
//! subtopics. Each submission is decomposed by an LLM, main topics are
//! matched against the user's existing ones by embedding similarity, fresh
//! subtopics are attached, and similar subtopics are cross-linked.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use topic_graph::{MemoryGraphStore, MemoryMindMapCache, MindMapService, TopicGraphBuilder, UserId};
//! use topic_graph::ai::OpenAI;
//!
//! let ai = Arc::new(OpenAI::from_env()?);
//! let builder = TopicGraphBuilder::new(Arc::new(MemoryGraphStore::new()), ai.clone(), ai);
//! let service = MindMapService::new(builder, Arc::new(MemoryMindMapCache::new()));
//!
//! let delta = service.submit("Today we planned the budget...", UserId::new()).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Provider, store and cache abstractions
//! - [`types`] - Nodes, edges, ids, the topic document and configuration
//! - [`matcher`] - Cosine similarity and best-match search
//! - [`builder`] - Graph construction for one transcription
//! - [`service`] - Submit / latest / graph operations
//! - [`stores`] - Memory and PostgreSQL stores, latest-result cache
//! - [`testing`] - Mock implementations for testing

pub mod builder;
pub mod error;
pub mod matcher;
pub mod prompts;
pub mod service;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

pub use builder::TopicGraphBuilder;
pub use error::{GraphError, Result};
pub use matcher::{cosine_similarity, find_similar, find_similar_node, SimilarMatch};
pub use service::MindMapService;
pub use traits::{
    ai::{EmbeddingService, TopicExtractor},
    cache::MindMapCache,
    store::GraphStore,
};
pub use types::{
    config::BuilderConfig,
    document::{parse_topic_document, MainTopic, SubtopicEntry, TopicDocument},
    edge::{Edge, EdgeKind},
    graph::GraphResult,
    ids::{EdgeId, Id, NodeId, UserId},
    node::{Node, NodeType},
};

pub use stores::{MemoryGraphStore, MemoryMindMapCache};

#[cfg(feature = "postgres")]
pub use stores::PostgresGraphStore;

pub use testing::{MockEmbeddingService, MockTopicExtractor};
