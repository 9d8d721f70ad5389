//! Testing utilities including mock implementations.
//!
//! Deterministic stand-ins for the extractor, the embedding model and a
//! flaky store, so graph construction can be exercised without network calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{GraphError, Result};
use crate::traits::{
    ai::{EmbeddingService, TopicExtractor},
    store::GraphStore,
};
use crate::types::{
    document::{parse_topic_document, TopicDocument},
    edge::{Edge, EdgeKind},
    graph::GraphResult,
    ids::{EdgeId, NodeId, UserId},
    node::{Node, NodeType},
};

/// Dimension of vectors produced by `MockEmbeddingService`.
pub const MOCK_EMBEDDING_DIM: usize = 64;

/// One queued extractor outcome.
enum MockResponse {
    Document(TopicDocument),
    Raw(String),
    Failure(String),
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractCall {
    pub transcription: String,
    pub existing_main_topics: Vec<String>,
}

/// A mock topic extractor returning queued responses in order.
///
/// Raw responses go through `parse_topic_document`, so malformed model
/// output can be simulated. An exhausted queue returns an empty document.
#[derive(Clone, Default)]
pub struct MockTopicExtractor {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<ExtractCall>>>,
}

impl MockTopicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a document to return.
    pub fn with_document(self, document: TopicDocument) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Document(document));
        self
    }

    /// Queue a raw model response to parse.
    pub fn with_raw_response(self, raw: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Raw(raw.into()));
        self
    }

    /// Queue a provider failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Failure(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<ExtractCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TopicExtractor for MockTopicExtractor {
    async fn extract(
        &self,
        transcription: &str,
        existing_main_topics: &[String],
    ) -> Result<TopicDocument> {
        self.calls.lock().unwrap().push(ExtractCall {
            transcription: transcription.to_string(),
            existing_main_topics: existing_main_topics.to_vec(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Document(document)) => Ok(document),
            Some(MockResponse::Raw(raw)) => parse_topic_document(&raw),
            Some(MockResponse::Failure(message)) => Err(GraphError::extraction(message)),
            None => Ok(TopicDocument::default()),
        }
    }
}

/// Unit vector along `axis`.
pub fn axis_vector(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; MOCK_EMBEDDING_DIM];
    v[axis % MOCK_EMBEDDING_DIM] = 1.0;
    v
}

/// Unit vector whose cosine similarity with `axis_vector(axis)` is exactly
/// `similarity`, using `other_axis` for the orthogonal component.
pub fn vector_at_similarity(axis: usize, other_axis: usize, similarity: f32) -> Vec<f32> {
    let mut v = vec![0.0; MOCK_EMBEDDING_DIM];
    v[axis % MOCK_EMBEDDING_DIM] = similarity;
    v[other_axis % MOCK_EMBEDDING_DIM] = (1.0 - similarity * similarity).max(0.0).sqrt();
    v
}

/// A mock embedding service with fixed per-text embeddings.
///
/// Texts without a registered embedding get their own orthogonal fallback
/// axis, so unknown texts never look similar to each other.
#[derive(Clone, Default)]
pub struct MockEmbeddingService {
    exact: Arc<Mutex<Vec<(String, Vec<f32>)>>>,
    failures: Arc<Mutex<Vec<String>>>,
    fallback_axes: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockEmbeddingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `embedding` when the text is exactly `text`.
    pub fn with_embedding(self, text: &str, embedding: Vec<f32>) -> Self {
        self.exact
            .lock()
            .unwrap()
            .push((text.to_string(), embedding));
        self
    }

    /// Give `text` the unit vector along `axis`.
    pub fn with_axis(self, text: &str, axis: usize) -> Self {
        self.with_embedding(text, axis_vector(axis))
    }

    /// Give `text` a vector at exactly `similarity` to `axis_vector(axis)`.
    pub fn with_vector_at_similarity(
        self,
        text: &str,
        axis: usize,
        other_axis: usize,
        similarity: f32,
    ) -> Self {
        self.with_embedding(text, vector_at_similarity(axis, other_axis, similarity))
    }

    /// Make two texts near-identical (cosine similarity ~0.99).
    pub fn with_similar_texts(self, text1: &str, text2: &str, axis: usize) -> Self {
        self.with_axis(text1, axis)
            .with_vector_at_similarity(text2, axis, axis + 1, 0.99)
    }

    /// Give each text its own orthogonal axis, starting at `first_axis`.
    pub fn with_different_texts(self, texts: &[&str], first_axis: usize) -> Self {
        texts
            .iter()
            .enumerate()
            .fold(self, |mock, (i, text)| mock.with_axis(text, first_axis + i))
    }

    /// Fail every call whose text contains `pattern`.
    pub fn failing_on(self, pattern: &str) -> Self {
        self.failures.lock().unwrap().push(pattern.to_string());
        self
    }

    /// Texts embedded so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn lookup(&self, text: &str) -> Vec<f32> {
        if let Some((_, v)) = self.exact.lock().unwrap().iter().find(|(t, _)| t == text) {
            return v.clone();
        }

        // Fallback axes count down from the top so they stay clear of the
        // low axes tests assign explicitly.
        let mut seen = self.fallback_axes.lock().unwrap();
        let index = match seen.iter().position(|t| t == text) {
            Some(i) => i,
            None => {
                seen.push(text.to_string());
                seen.len() - 1
            }
        };
        axis_vector(MOCK_EMBEDDING_DIM - 1 - (index % (MOCK_EMBEDDING_DIM / 2)))
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.lock().unwrap().push(text.to_string());

        let fails = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|p| text.contains(p.as_str()));
        if fails {
            return Err(GraphError::embedding(format!(
                "mock embedding failure for '{}'",
                text
            )));
        }

        Ok(self.lookup(text))
    }
}

/// Which write a `FailingGraphStore` should reject.
#[derive(Debug, Clone, PartialEq)]
pub enum FailOn {
    /// Reject any node insert whose name matches.
    NodeNamed(String),
    /// Reject every edge insert of this kind.
    EdgeKind(EdgeKind),
    /// Reject every `edges_to` append.
    AppendEdgeRef,
    /// Reject every `find_edge` lookup.
    FindEdge,
    /// Reject every node query.
    QueryNodes,
}

/// Wraps a store and fails selected operations.
pub struct FailingGraphStore<S> {
    inner: S,
    failures: Mutex<Vec<FailOn>>,
}

impl<S: GraphStore> FailingGraphStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(self, failure: FailOn) -> Self {
        self.failures.lock().unwrap().push(failure);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn should_fail(&self, check: impl Fn(&FailOn) -> bool) -> bool {
        self.failures.lock().unwrap().iter().any(check)
    }
}

#[async_trait]
impl<S: GraphStore> GraphStore for FailingGraphStore<S> {
    async fn query_nodes(
        &self,
        user_id: UserId,
        node_type: NodeType,
        parent_id: Option<NodeId>,
    ) -> Result<Vec<Node>> {
        if self.should_fail(|f| *f == FailOn::QueryNodes) {
            return Err(GraphError::storage("mock query failure"));
        }
        self.inner.query_nodes(user_id, node_type, parent_id).await
    }

    async fn insert_node(&self, node: Node) -> Result<Node> {
        if self.should_fail(|f| matches!(f, FailOn::NodeNamed(name) if *name == node.name)) {
            return Err(GraphError::storage(format!(
                "mock insert failure for '{}'",
                node.name
            )));
        }
        self.inner.insert_node(node).await
    }

    async fn insert_edge(&self, edge: Edge) -> Result<Edge> {
        if self.should_fail(|f| *f == FailOn::EdgeKind(edge.kind)) {
            return Err(GraphError::storage("mock edge insert failure"));
        }
        self.inner.insert_edge(edge).await
    }

    async fn find_edge(&self, source_id: NodeId, target_id: NodeId) -> Result<Option<Edge>> {
        if self.should_fail(|f| *f == FailOn::FindEdge) {
            return Err(GraphError::storage("mock find_edge failure"));
        }
        self.inner.find_edge(source_id, target_id).await
    }

    async fn append_edge_ref(&self, node_id: NodeId, edge_id: EdgeId) -> Result<()> {
        if self.should_fail(|f| *f == FailOn::AppendEdgeRef) {
            return Err(GraphError::storage("mock append failure"));
        }
        self.inner.append_edge_ref(node_id, edge_id).await
    }

    async fn load_graph(&self, user_id: UserId) -> Result<GraphResult> {
        self.inner.load_graph(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::cosine_similarity;
    use crate::types::document::MainTopic;

    #[tokio::test]
    async fn test_extractor_returns_queue_in_order() {
        let extractor = MockTopicExtractor::new()
            .with_document(TopicDocument::new(vec![MainTopic::new("Work", vec![])]))
            .with_raw_response("not json")
            .with_failure("rate limited");

        let first = extractor.extract("a", &[]).await.unwrap();
        assert_eq!(first.main_topics[0].name, "Work");
        assert!(extractor.extract("b", &[]).await.is_err());
        assert!(extractor.extract("c", &[]).await.is_err());
        assert!(extractor.extract("d", &["Work".into()]).await.unwrap().main_topics.is_empty());

        let calls = extractor.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[3].existing_main_topics, vec!["Work"]);
    }

    #[tokio::test]
    async fn test_vector_at_similarity_is_exact() {
        let embedder = MockEmbeddingService::new()
            .with_axis("base", 0)
            .with_vector_at_similarity("near", 0, 1, 0.7);

        let base = embedder.embed("base").await.unwrap();
        let near = embedder.embed("near").await.unwrap();
        assert!((cosine_similarity(&base, &near) - 0.7).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_unknown_texts_are_orthogonal_and_stable() {
        let embedder = MockEmbeddingService::new();
        let a = embedder.embed("alpha").await.unwrap();
        let b = embedder.embed("beta").await.unwrap();

        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(embedder.embed("alpha").await.unwrap(), a);
        assert_eq!(embedder.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failing_on_pattern() {
        let embedder = MockEmbeddingService::new().failing_on("Broken");
        assert!(matches!(
            embedder.embed("Broken topic").await,
            Err(GraphError::Embedding(_))
        ));
        assert!(embedder.embed("Fine").await.is_ok());
    }
}
