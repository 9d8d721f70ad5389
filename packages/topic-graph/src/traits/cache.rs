//! Latest-result cache, keyed by user.

use async_trait::async_trait;

use crate::types::{graph::GraphResult, ids::UserId};

/// Holds the most recent successful build per user. No expiry; each `set`
/// replaces the previous value.
#[async_trait]
pub trait MindMapCache: Send + Sync {
    async fn get(&self, user_id: UserId) -> Option<GraphResult>;

    async fn set(&self, user_id: UserId, result: GraphResult);
}
