//! Directed relations between nodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ids::{EdgeId, NodeId, UserId};

/// Edge family. Containment links a main topic to its subtopic; similarity
/// links two subtopics whose embeddings are close.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Containment,
    Similarity,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Containment => "containment",
            EdgeKind::Similarity => "similarity",
        }
    }
}

impl std::str::FromStr for EdgeKind {
    type Err = crate::error::GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "containment" => Ok(EdgeKind::Containment),
            "similarity" => Ok(EdgeKind::Similarity),
            _ => Err(crate::error::GraphError::validation(format!(
                "invalid edge kind: {}",
                s
            ))),
        }
    }
}

/// Stored directionally. Similarity edges are semantically undirected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub user_id: UserId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub kind: EdgeKind,
    /// Cosine similarity that produced a similarity edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn containment(user_id: UserId, parent_id: NodeId, child_id: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            user_id,
            source_id: parent_id,
            target_id: child_id,
            kind: EdgeKind::Containment,
            similarity: None,
            created_at: Utc::now(),
        }
    }

    pub fn similarity(user_id: UserId, source_id: NodeId, target_id: NodeId, score: f32) -> Self {
        Self {
            id: EdgeId::new(),
            user_id,
            source_id,
            target_id,
            kind: EdgeKind::Similarity,
            similarity: Some(score),
            created_at: Utc::now(),
        }
    }
}
