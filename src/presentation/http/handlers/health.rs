//! Health Check Handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::startup::AppState;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chats: usize,
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        chats: state.chats.len(),
    })
}
