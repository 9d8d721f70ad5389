//! Maps engine errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use topic_graph::GraphError;

/// Handler error. Serializes as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub GraphError);

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GraphError::Validation { .. } => StatusCode::BAD_REQUEST,
            GraphError::Extraction(_) | GraphError::Embedding(_) => StatusCode::BAD_GATEWAY,
            GraphError::NotFound { .. } => StatusCode::NOT_FOUND,
            GraphError::Storage(_) | GraphError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    fn message(&self) -> String {
        match &self.0 {
            GraphError::Validation { reason } => reason.clone(),
            GraphError::NotFound { .. } => "No mind map available.".to_string(),
            GraphError::Extraction(_) => "Topic extraction failed.".to_string(),
            GraphError::Embedding(_) => "Embedding service failed.".to_string(),
            GraphError::Storage(_) | GraphError::Config(_) => "Internal server error.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_graph::UserId;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(GraphError::validation("No transcription provided.")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(GraphError::extraction("bad json")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(GraphError::NotFound {
                user_id: UserId::new()
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(GraphError::storage("down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = ApiError(GraphError::storage("password=hunter2"));
        assert!(!err.message().contains("hunter2"));
    }
}
