//! Authentication Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::application::dto::request::LoginRequest;
use crate::application::dto::response::TokenResponse;
use crate::application::services::Credentials;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(body) = body?;

    // Validate request
    body.validate().map_err(validation_error)?;

    let credentials = Credentials::from(body);
    let security = state.security.clone();

    // Password hashing is CPU bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || security.login(&credentials))
        .await
        .map_err(|e| AppError::Internal(format!("Login task failed: {}", e)))?;

    metrics::record_login(result.is_ok());

    let token = result.map_err(|e| {
        tracing::info!(reason = %e, "Login rejected");
        AppError::from(e)
    })?;

    Ok(Json(TokenResponse::from(token)))
}
