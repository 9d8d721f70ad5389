//! Typed errors for the topic graph engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! document-level failures from per-entity ones.

use thiserror::Error;

use crate::types::ids::UserId;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the engine and its collaborators.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Input rejected before any provider was invoked
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    /// Topic extraction failed or returned an unparseable document
    #[error("extraction failed: {0}")]
    Extraction(#[source] BoxError),

    /// Embedding provider failed
    #[error("embedding failed: {0}")]
    Embedding(#[source] BoxError),

    /// Graph store operation failed
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),

    /// No mind map has been built for this user yet
    #[error("no mind map available for user {user_id}")]
    NotFound { user_id: UserId },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl GraphError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn extraction(err: impl Into<BoxError>) -> Self {
        Self::Extraction(err.into())
    }

    pub fn embedding(err: impl Into<BoxError>) -> Self {
        Self::Embedding(err.into())
    }

    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_box_plain_strings() {
        let err = GraphError::extraction("model returned prose");
        assert_eq!(err.to_string(), "extraction failed: model returned prose");

        let err = GraphError::storage(String::from("connection reset"));
        assert!(matches!(err, GraphError::Storage(_)));
    }

    #[test]
    fn test_not_found_names_user() {
        let user_id = UserId::new();
        let err = GraphError::NotFound { user_id };
        assert!(err.to_string().contains(&user_id.to_string()));
    }
}
