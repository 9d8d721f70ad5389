//! In-memory latest-result cache.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::traits::cache::MindMapCache;
use crate::types::{graph::GraphResult, ids::UserId};

/// Keeps the most recent successful build per user for the life of the
/// process.
#[derive(Default)]
pub struct MemoryMindMapCache {
    entries: RwLock<HashMap<UserId, GraphResult>>,
}

impl MemoryMindMapCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MindMapCache for MemoryMindMapCache {
    async fn get(&self, user_id: UserId) -> Option<GraphResult> {
        self.entries.read().await.get(&user_id).cloned()
    }

    async fn set(&self, user_id: UserId, result: GraphResult) {
        self.entries.write().await.insert(user_id, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node::Node;

    #[tokio::test]
    async fn test_set_overwrites_per_user() {
        let cache = MemoryMindMapCache::new();
        let (alice, bob) = (UserId::new(), UserId::new());
        assert!(cache.get(alice).await.is_none());

        let first = GraphResult {
            nodes: vec![Node::main(alice, "Work", vec![])],
            edges: vec![],
        };
        cache.set(alice, first).await;
        cache.set(alice, GraphResult::new()).await;

        assert_eq!(cache.get(alice).await, Some(GraphResult::new()));
        assert!(cache.get(bob).await.is_none());
    }
}
