//! Integration tests for the submit / latest / graph operations.

use std::sync::Arc;

use topic_graph::testing::{MockEmbeddingService, MockTopicExtractor};
use topic_graph::{
    GraphError, MainTopic, MemoryGraphStore, MemoryMindMapCache, MindMapService, SubtopicEntry,
    TopicDocument, TopicGraphBuilder, UserId,
};

fn budgeting_document() -> TopicDocument {
    TopicDocument::new(vec![MainTopic::new(
        "Budgeting",
        vec![SubtopicEntry::new("Savings", vec!["Emergency fund".into()])],
    )])
}

fn service(extractor: &MockTopicExtractor) -> (MindMapService, Arc<MemoryGraphStore>) {
    let store = Arc::new(MemoryGraphStore::new());
    let embedder = MockEmbeddingService::new()
        .with_axis("Budgeting", 0)
        .with_axis("Savings", 1);
    let builder = TopicGraphBuilder::new(
        store.clone(),
        Arc::new(extractor.clone()),
        Arc::new(embedder),
    );
    (
        MindMapService::new(builder, Arc::new(MemoryMindMapCache::new())),
        store,
    )
}

#[tokio::test]
async fn test_blank_transcription_is_rejected_before_extraction() {
    let extractor = MockTopicExtractor::new();
    let (service, _) = service(&extractor);

    for blank in ["", "   ", "\n\t"] {
        let err = service.submit(blank, UserId::new()).await.unwrap_err();
        match err {
            GraphError::Validation { reason } => assert_eq!(reason, "No transcription provided."),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_latest_without_prior_submission_is_not_found() {
    let (service, _) = service(&MockTopicExtractor::new());
    let user = UserId::new();

    match service.latest(user).await {
        Err(GraphError::NotFound { user_id }) => assert_eq!(user_id, user),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_latest_returns_last_successful_submission() {
    let extractor = MockTopicExtractor::new()
        .with_document(budgeting_document())
        .with_failure("provider unavailable");
    let (service, _) = service(&extractor);
    let user = UserId::new();

    let submitted = service.submit("Budget talk.", user).await.unwrap();
    assert_eq!(service.latest(user).await.unwrap(), submitted);

    // A failed run leaves the previous result in place
    assert!(service.submit("Budget talk again.", user).await.is_err());
    assert_eq!(service.latest(user).await.unwrap(), submitted);

    // Latest is per user
    assert!(service.latest(UserId::new()).await.is_err());
}

#[tokio::test]
async fn test_graph_returns_everything_stored_for_user() {
    let extractor = MockTopicExtractor::new()
        .with_document(budgeting_document())
        .with_document(budgeting_document());
    let (service, store) = service(&extractor);
    let user = UserId::new();

    service.submit("First.", user).await.unwrap();
    let second = service.submit("Second.", user).await.unwrap();

    let graph = service.graph(user).await.unwrap();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.nodes.len(), store.node_count());

    // The latest result only holds the second run's delta
    assert_eq!(second.nodes.len(), 1);
    assert!(service.graph(UserId::new()).await.unwrap().is_empty());
}
