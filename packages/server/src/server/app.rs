//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use topic_graph::MindMapService;

use crate::server::middleware::{require_user, USER_ID_HEADER};
use crate::server::routes::{graph_handler, health_handler, latest_handler, submit_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: MindMapService,
}

/// Build the Axum application router
///
/// `/api/*` routes require the `X-User-Id` header; `/health` is public.
/// An empty `allowed_origins` list allows any origin.
pub fn build_app(service: MindMapService, allowed_origins: &[String]) -> Router {
    let app_state = AppState { service };

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)]);

    let api = Router::new()
        .route("/transcriptions", post(submit_handler))
        .route("/mind-map", get(latest_handler))
        .route("/graph", get(graph_handler))
        .layer(middleware::from_fn(require_user));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
