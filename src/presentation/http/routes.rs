//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public routes
        .route("/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(metrics_handler))
        // Protected routes (require a valid token)
        .merge(protected_routes(state.clone()))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Chat and upload routes
fn protected_routes(state: AppState) -> Router<AppState> {
    let upload_limit = state.settings.storage.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route("/chats/{chat_id}", get(handlers::chat::get_chat))
        .route(
            "/upload",
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
