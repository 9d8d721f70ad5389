//! Mind map endpoints.
//!
//! POST /api/transcriptions - build the graph delta for a transcription
//! GET  /api/mind-map       - latest delta for the caller
//! GET  /api/graph          - every stored node and edge for the caller

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use topic_graph::service::EMPTY_TRANSCRIPTION;
use topic_graph::{GraphError, GraphResult};

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct SubmitTranscription {
    /// Missing is treated like blank and rejected with 400.
    #[serde(default)]
    pub transcription: String,
}

/// A body that is absent, not JSON or not shaped like `SubmitTranscription`
/// carries no transcription and gets the same 400 as a blank one.
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<SubmitTranscription>, JsonRejection>,
) -> Result<Json<GraphResult>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected transcription body");
        GraphError::validation(EMPTY_TRANSCRIPTION)
    })?;

    let result = state.service.submit(&body.transcription, user_id).await?;
    Ok(Json(result))
}

pub async fn latest_handler(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<GraphResult>, ApiError> {
    Ok(Json(state.service.latest(user_id).await?))
}

pub async fn graph_handler(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<GraphResult>, ApiError> {
    Ok(Json(state.service.graph(user_id).await?))
}
