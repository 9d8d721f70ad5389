//! The materialized graph returned to callers.

use serde::{Deserialize, Serialize};

use crate::types::{edge::Edge, node::Node};

/// Nodes and edges produced by one run (or loaded for one user).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_named(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
