//! Mind map nodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::types::ids::{EdgeId, NodeId, UserId};

/// Node level in the mind map. Detail points are not nodes; they live in
/// `Node::info_points` of their subtopic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Main,
    Subtopic,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Main => "main",
            NodeType::Subtopic => "subtopic",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(NodeType::Main),
            "subtopic" => Ok(NodeType::Subtopic),
            _ => Err(GraphError::validation(format!("invalid node type: {}", s))),
        }
    }
}

/// A main topic or subtopic owned by one user.
///
/// Only `edges_to` changes after creation; everything else is fixed at insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Computed once from `name`. Internal dedup key, not part of the JSON view.
    #[serde(skip)]
    pub embedding: Vec<f32>,
    pub info_points: Vec<String>,
    pub parent_id: Option<NodeId>,
    /// Outgoing edge ids, appended whenever an edge with this node as source is stored.
    pub edges_to: Vec<EdgeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// New top-level topic. Main topics never carry a parent or info points.
    pub fn main(user_id: UserId, name: impl Into<String>, embedding: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::new(),
            user_id,
            name: name.into(),
            node_type: NodeType::Main,
            embedding,
            info_points: Vec::new(),
            parent_id: None,
            edges_to: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// New subtopic under `parent_id`, which must be a main node of the same user.
    pub fn subtopic(
        user_id: UserId,
        parent_id: NodeId,
        name: impl Into<String>,
        info_points: Vec<String>,
        embedding: Vec<f32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::new(),
            user_id,
            name: name.into(),
            node_type: NodeType::Subtopic,
            embedding,
            info_points,
            parent_id: Some(parent_id),
            edges_to: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_round_trips_through_str() {
        for node_type in [NodeType::Main, NodeType::Subtopic] {
            assert_eq!(node_type.to_string().parse::<NodeType>().unwrap(), node_type);
        }
        assert!("detail".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_constructors_keep_parent_invariant() {
        let user = UserId::new();
        let main = Node::main(user, "Budgeting", vec![1.0, 0.0]);
        assert_eq!(main.node_type, NodeType::Main);
        assert!(main.parent_id.is_none());
        assert!(main.info_points.is_empty());

        let sub = Node::subtopic(
            user,
            main.id,
            "Savings",
            vec!["Emergency fund".into()],
            vec![0.0, 1.0],
        );
        assert_eq!(sub.parent_id, Some(main.id));
        assert_eq!(sub.node_type, NodeType::Subtopic);
        assert!(sub.edges_to.is_empty());
    }

    #[test]
    fn test_json_view_hides_embedding_and_renames_type() {
        let node = Node::main(UserId::new(), "Budgeting", vec![0.25; 8]);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "main");
        assert!(json.get("embedding").is_none());
        assert!(json["parent_id"].is_null());
    }
}
