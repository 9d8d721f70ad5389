use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use topic_graph::UserId;

/// Header carrying the caller's user id. Identity is resolved upstream.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user for the current request
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser(pub UserId);

/// Rejects requests without a valid `X-User-Id` header and adds
/// `CurrentUser` to request extensions otherwise.
pub async fn require_user(mut request: Request, next: Next) -> Response {
    match user_from_request(&request) {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser(user_id));
            next.run(request).await
        }
        None => {
            debug!("Missing or malformed user id header");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing or invalid X-User-Id header." })),
            )
                .into_response()
        }
    }
}

fn user_from_request(request: &Request) -> Option<UserId> {
    let value = request.headers().get(USER_ID_HEADER)?;
    UserId::parse(value.to_str().ok()?.trim()).ok()
}
