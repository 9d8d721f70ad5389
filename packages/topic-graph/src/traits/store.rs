//! Graph store adapter.
//!
//! The store is the single source of truth; the engine keeps no graph state
//! between runs. Every read is scoped by user. Implementations must make each
//! single-row write atomic; the engine does not resolve create-if-absent races.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    edge::Edge,
    graph::GraphResult,
    ids::{EdgeId, NodeId, UserId},
    node::{Node, NodeType},
};

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Nodes of `node_type` owned by `user_id`, optionally restricted to one
    /// parent. Returned in creation order.
    async fn query_nodes(
        &self,
        user_id: UserId,
        node_type: NodeType,
        parent_id: Option<NodeId>,
    ) -> Result<Vec<Node>>;

    /// Persist a new node and return it as stored.
    async fn insert_node(&self, node: Node) -> Result<Node>;

    /// Persist a new edge and return it as stored.
    async fn insert_edge(&self, edge: Edge) -> Result<Edge>;

    /// Edge with exactly this `(source, target)` pair, if any.
    async fn find_edge(&self, source_id: NodeId, target_id: NodeId) -> Result<Option<Edge>>;

    /// Append `edge_id` to the source node's `edges_to` list.
    async fn append_edge_ref(&self, node_id: NodeId, edge_id: EdgeId) -> Result<()>;

    /// Every node and edge owned by `user_id`.
    async fn load_graph(&self, user_id: UserId) -> Result<GraphResult>;
}
