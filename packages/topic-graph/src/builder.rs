//! Topic graph construction.
//!
//! One call to [`TopicGraphBuilder::build`] turns a transcription into a graph
//! delta merged into the user's stored graph:
//!
//! 1. Load the user's main topics (names prompt the extractor, embeddings
//!    form the dedup pool).
//! 2. Extract the topic document. Failure here aborts the run.
//! 3. Resolve each main topic against the pool, reusing a match or creating
//!    a node.
//! 4. Create a fresh subtopic node per subtopic with a containment edge from
//!    its main topic.
//! 5. Link similar subtopics created in this run.
//!
//! Entity-level store failures are logged and skipped; the affected node or
//! edge is simply absent from the result.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::matcher::{cosine_similarity, find_similar_node};
use crate::traits::{
    ai::{EmbeddingService, TopicExtractor},
    store::GraphStore,
};
use crate::types::{
    config::BuilderConfig,
    document::{MainTopic, SubtopicEntry},
    edge::Edge,
    graph::GraphResult,
    ids::{NodeId, UserId},
    node::{Node, NodeType},
};

/// Orchestrates extraction, embedding, matching and persistence.
///
/// Holds no graph state between runs; the store is the source of truth.
#[derive(Clone)]
pub struct TopicGraphBuilder {
    store: Arc<dyn GraphStore>,
    extractor: Arc<dyn TopicExtractor>,
    embedder: Arc<dyn EmbeddingService>,
    config: BuilderConfig,
}

/// Accumulates one run's output and keeps `edges_to` of returned nodes in
/// step with what the store recorded.
#[derive(Default)]
struct RunOutput {
    result: GraphResult,
    positions: HashMap<NodeId, usize>,
}

impl RunOutput {
    fn push_node(&mut self, node: Node) {
        self.positions.insert(node.id, self.result.nodes.len());
        self.result.nodes.push(node);
    }

    fn push_edge(&mut self, stored: StoredEdge) {
        let StoredEdge { edge, indexed } = stored;
        if indexed {
            if let Some(&i) = self.positions.get(&edge.source_id) {
                self.result.nodes[i].edges_to.push(edge.id);
            }
        }
        self.result.edges.push(edge);
    }
}

/// An inserted edge and whether the source node's `edges_to` recorded it.
struct StoredEdge {
    edge: Edge,
    indexed: bool,
}

impl TopicGraphBuilder {
    pub fn new(
        store: Arc<dyn GraphStore>,
        extractor: Arc<dyn TopicExtractor>,
        embedder: Arc<dyn EmbeddingService>,
    ) -> Self {
        Self::with_config(store, extractor, embedder, BuilderConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn GraphStore>,
        extractor: Arc<dyn TopicExtractor>,
        embedder: Arc<dyn EmbeddingService>,
        config: BuilderConfig,
    ) -> Self {
        Self {
            store,
            extractor,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    /// Build and persist the graph delta for one transcription.
    ///
    /// Assumes `transcription` is non-empty; callers validate input first.
    /// Returns only nodes created in this run plus every edge created in it.
    /// A reused main topic is referenced by edges but not repeated in `nodes`.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn build(&self, transcription: &str, user_id: UserId) -> Result<GraphResult> {
        let mut main_pool = self
            .store
            .query_nodes(user_id, NodeType::Main, None)
            .await?;
        let existing_names: Vec<String> = main_pool.iter().map(|n| n.name.clone()).collect();

        info!(
            existing_main_topics = existing_names.len(),
            transcription_len = transcription.len(),
            "Building topic graph"
        );

        let document = self
            .extractor
            .extract(transcription, &existing_names)
            .await?;

        debug!(
            main_topics = document.main_topics.len(),
            subtopics = document.subtopic_count(),
            "Topic document extracted"
        );

        let mut output = RunOutput::default();
        let mut new_subtopics: Vec<Node> = Vec::new();

        for main in &document.main_topics {
            let Some(main_id) = self
                .resolve_main_topic(user_id, main, &mut main_pool, &mut output)
                .await?
            else {
                continue;
            };

            for subtopic in &main.subtopics {
                if let Some(node) = self
                    .create_subtopic(user_id, main_id, subtopic, &mut output)
                    .await
                {
                    new_subtopics.push(node);
                }
            }
        }

        for stored in self.cross_link(user_id, &new_subtopics).await {
            output.push_edge(stored);
        }

        info!(
            nodes = output.result.nodes.len(),
            edges = output.result.edges.len(),
            "Topic graph built"
        );

        Ok(output.result)
    }

    /// Returns the id the subtree should hang from, or `None` when the main
    /// topic could not be persisted and its subtree is skipped.
    async fn resolve_main_topic(
        &self,
        user_id: UserId,
        main: &MainTopic,
        pool: &mut Vec<Node>,
        output: &mut RunOutput,
    ) -> Result<Option<NodeId>> {
        let embedding = self.embedder.embed(&main.name).await?;

        if let Some(found) =
            find_similar_node(&embedding, pool, self.config.main_topic_threshold)
        {
            debug!(
                topic = %main.name,
                matched = %found.item.name,
                node_id = %found.item.id,
                score = found.score,
                "Reusing existing main topic"
            );
            return Ok(Some(found.item.id));
        }

        match self
            .store
            .insert_node(Node::main(user_id, main.name.clone(), embedding))
            .await
        {
            Ok(node) => {
                debug!(topic = %node.name, node_id = %node.id, "Created main topic");
                let id = node.id;
                pool.push(node.clone());
                output.push_node(node);
                Ok(Some(id))
            }
            Err(e) => {
                warn!(
                    topic = %main.name,
                    error = %e,
                    "Failed to persist main topic, skipping its subtopics"
                );
                Ok(None)
            }
        }
    }

    /// Returns the new node when one was created, for cross-linking.
    async fn create_subtopic(
        &self,
        user_id: UserId,
        main_id: NodeId,
        subtopic: &SubtopicEntry,
        output: &mut RunOutput,
    ) -> Option<Node> {
        let embedding = match self.embedder.embed(&subtopic.name).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(subtopic = %subtopic.name, error = %e, "Failed to embed subtopic, skipping");
                return None;
            }
        };

        if self.config.dedup_subtopics {
            if let Some(existing) = self
                .find_existing_subtopic(user_id, main_id, &embedding)
                .await
            {
                debug!(
                    subtopic = %subtopic.name,
                    matched = %existing.name,
                    node_id = %existing.id,
                    "Reusing existing subtopic"
                );
                return None;
            }
        }

        let node = Node::subtopic(
            user_id,
            main_id,
            subtopic.name.clone(),
            subtopic.details.clone(),
            embedding,
        );

        let node = match self.store.insert_node(node).await {
            Ok(node) => node,
            Err(e) => {
                warn!(subtopic = %subtopic.name, error = %e, "Failed to persist subtopic, skipping");
                return None;
            }
        };

        debug!(subtopic = %node.name, node_id = %node.id, parent_id = %main_id, "Created subtopic");
        output.push_node(node.clone());

        if let Some(stored) = self
            .store_edge(Edge::containment(user_id, main_id, node.id))
            .await
        {
            output.push_edge(stored);
        }

        Some(node)
    }

    async fn find_existing_subtopic(
        &self,
        user_id: UserId,
        main_id: NodeId,
        embedding: &[f32],
    ) -> Option<Node> {
        let siblings = match self
            .store
            .query_nodes(user_id, NodeType::Subtopic, Some(main_id))
            .await
        {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(parent_id = %main_id, error = %e, "Failed to load subtopics for dedup");
                return None;
            }
        };

        find_similar_node(embedding, &siblings, self.config.subtopic_threshold)
            .map(|found| found.item.clone())
    }

    /// Create similarity edges between every pair of `subtopics` whose
    /// embeddings clear the cross-link threshold.
    ///
    /// Pairs are visited in slice order; the earlier node becomes the source.
    /// A pair that already has a stored `(source, target)` edge is skipped, so
    /// re-running over the same nodes creates nothing new.
    pub async fn link_similar_subtopics(&self, user_id: UserId, subtopics: &[Node]) -> Vec<Edge> {
        self.cross_link(user_id, subtopics)
            .await
            .into_iter()
            .map(|stored| stored.edge)
            .collect()
    }

    async fn cross_link(&self, user_id: UserId, subtopics: &[Node]) -> Vec<StoredEdge> {
        let mut edges = Vec::new();

        for (i, source) in subtopics.iter().enumerate() {
            for target in &subtopics[i + 1..] {
                let score = cosine_similarity(&source.embedding, &target.embedding);
                if score < self.config.cross_link_threshold {
                    continue;
                }

                match self.store.find_edge(source.id, target.id).await {
                    Ok(Some(existing)) => {
                        debug!(edge_id = %existing.id, "Cross-link already stored");
                        continue;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(
                            source_id = %source.id,
                            target_id = %target.id,
                            error = %e,
                            "Failed to check for existing cross-link, skipping"
                        );
                        continue;
                    }
                }

                debug!(
                    source = %source.name,
                    target = %target.name,
                    score,
                    "Linking similar subtopics"
                );

                if let Some(stored) = self
                    .store_edge(Edge::similarity(user_id, source.id, target.id, score))
                    .await
                {
                    edges.push(stored);
                }
            }
        }

        edges
    }

    /// Insert an edge, then record it on the source node.
    ///
    /// The `edges_to` append is a secondary index: its failure is logged and
    /// the edge still counts as created.
    async fn store_edge(&self, edge: Edge) -> Option<StoredEdge> {
        let edge = match self.store.insert_edge(edge).await {
            Ok(edge) => edge,
            Err(e) => {
                warn!(error = %e, "Failed to persist edge, skipping");
                return None;
            }
        };

        let indexed = match self.store.append_edge_ref(edge.source_id, edge.id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    node_id = %edge.source_id,
                    edge_id = %edge.id,
                    error = %e,
                    "Failed to append edge to source node's edges_to"
                );
                false
            }
        };

        Some(StoredEdge { edge, indexed })
    }
}
