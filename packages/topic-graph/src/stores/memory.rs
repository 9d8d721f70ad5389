//! In-memory graph store for testing and development.

use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{GraphError, Result};
use crate::traits::store::GraphStore;
use crate::types::{
    edge::Edge,
    graph::GraphResult,
    ids::{EdgeId, NodeId, UserId},
    node::{Node, NodeType},
};

/// In-memory storage for nodes and edges.
///
/// Nodes and edges are kept in insertion order, which is also creation
/// order. Data is lost on restart.
#[derive(Default)]
pub struct MemoryGraphStore {
    nodes: RwLock<Vec<Node>>,
    edges: RwLock<Vec<Edge>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| GraphError::storage("memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| GraphError::storage("memory store lock poisoned"))
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes across all users.
    pub fn node_count(&self) -> usize {
        self.nodes.read().map(|n| n.len()).unwrap_or(0)
    }

    /// Number of stored edges across all users.
    pub fn edge_count(&self) -> usize {
        self.edges.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Look up a stored node by id.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes
            .read()
            .ok()
            .and_then(|nodes| nodes.iter().find(|n| n.id == id).cloned())
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        if let Ok(mut nodes) = self.nodes.write() {
            nodes.clear();
        }
        if let Ok(mut edges) = self.edges.write() {
            edges.clear();
        }
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn query_nodes(
        &self,
        user_id: UserId,
        node_type: NodeType,
        parent_id: Option<NodeId>,
    ) -> Result<Vec<Node>> {
        Ok(read(&self.nodes)?
            .iter()
            .filter(|n| n.user_id == user_id && n.node_type == node_type)
            .filter(|n| parent_id.map_or(true, |p| n.parent_id == Some(p)))
            .cloned()
            .collect())
    }

    async fn insert_node(&self, node: Node) -> Result<Node> {
        let mut nodes = write(&self.nodes)?;
        if nodes.iter().any(|n| n.id == node.id) {
            return Err(GraphError::storage(format!("node {} already exists", node.id)));
        }
        nodes.push(node.clone());
        Ok(node)
    }

    async fn insert_edge(&self, edge: Edge) -> Result<Edge> {
        let mut edges = write(&self.edges)?;
        if edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::storage(format!("edge {} already exists", edge.id)));
        }
        edges.push(edge.clone());
        Ok(edge)
    }

    async fn find_edge(&self, source_id: NodeId, target_id: NodeId) -> Result<Option<Edge>> {
        Ok(read(&self.edges)?
            .iter()
            .find(|e| e.source_id == source_id && e.target_id == target_id)
            .cloned())
    }

    async fn append_edge_ref(&self, node_id: NodeId, edge_id: EdgeId) -> Result<()> {
        let mut nodes = write(&self.nodes)?;
        let node = nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or_else(|| GraphError::storage(format!("node {} not found", node_id)))?;
        node.edges_to.push(edge_id);
        node.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn load_graph(&self, user_id: UserId) -> Result<GraphResult> {
        let nodes = read(&self.nodes)?
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        let edges = read(&self.edges)?
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        Ok(GraphResult { nodes, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_nodes_scopes_by_user_type_and_parent() {
        let store = MemoryGraphStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());

        let work = store
            .insert_node(Node::main(alice, "Work", vec![1.0, 0.0]))
            .await
            .unwrap();
        let health = store
            .insert_node(Node::main(alice, "Health", vec![0.0, 1.0]))
            .await
            .unwrap();
        store
            .insert_node(Node::main(bob, "Work", vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .insert_node(Node::subtopic(alice, work.id, "Deadlines", vec![], vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .insert_node(Node::subtopic(alice, health.id, "Sleep", vec![], vec![0.0, 1.0]))
            .await
            .unwrap();

        let mains = store.query_nodes(alice, NodeType::Main, None).await.unwrap();
        let names: Vec<_> = mains.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Health"]);

        let subs = store
            .query_nodes(alice, NodeType::Subtopic, Some(work.id))
            .await
            .unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Deadlines");

        let bobs = store.query_nodes(bob, NodeType::Main, None).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].name, "Work");
    }

    #[tokio::test]
    async fn test_find_edge_is_directional() {
        let store = MemoryGraphStore::new();
        let user = UserId::new();
        let (a, b) = (NodeId::new(), NodeId::new());

        let edge = store
            .insert_edge(Edge::similarity(user, a, b, 0.9))
            .await
            .unwrap();

        assert_eq!(store.find_edge(a, b).await.unwrap(), Some(edge));
        assert!(store.find_edge(b, a).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_edge_ref() {
        let store = MemoryGraphStore::new();
        let user = UserId::new();
        let node = store
            .insert_node(Node::main(user, "Work", vec![1.0]))
            .await
            .unwrap();
        let edge_id = EdgeId::new();

        store.append_edge_ref(node.id, edge_id).await.unwrap();
        assert_eq!(store.node(node.id).unwrap().edges_to, vec![edge_id]);

        let missing = store.append_edge_ref(NodeId::new(), edge_id).await;
        assert!(matches!(missing, Err(GraphError::Storage(_))));
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = MemoryGraphStore::new();
        let node = Node::main(UserId::new(), "Work", vec![1.0]);

        store.insert_node(node.clone()).await.unwrap();
        assert!(store.insert_node(node).await.is_err());
        assert_eq!(store.node_count(), 1);
    }

    #[tokio::test]
    async fn test_load_graph_returns_only_users_data() {
        let store = MemoryGraphStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());

        let main = store
            .insert_node(Node::main(alice, "Work", vec![1.0]))
            .await
            .unwrap();
        let sub = store
            .insert_node(Node::subtopic(alice, main.id, "Deadlines", vec![], vec![1.0]))
            .await
            .unwrap();
        store
            .insert_edge(Edge::containment(alice, main.id, sub.id))
            .await
            .unwrap();
        store
            .insert_node(Node::main(bob, "Travel", vec![1.0]))
            .await
            .unwrap();

        let graph = store.load_graph(alice).await.unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);

        store.clear();
        assert!(store.load_graph(alice).await.unwrap().is_empty());
    }
}
