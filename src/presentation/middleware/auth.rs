//! Authentication Middleware
//!
//! Token validation gate for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::application::services::{AuthError, Identity};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated caller extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn subject(&self) -> &str {
        &self.identity.subject
    }
}

/// Pull the bearer token out of the request headers.
fn bearer_token(request: &Request) -> Result<String, AuthError> {
    if !request.headers().contains_key(AUTHORIZATION) {
        return Err(AuthError::MissingToken);
    }

    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or(AuthError::InvalidToken)
}

/// Authentication middleware that validates access tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = bearer_token(&request)
        .and_then(|token| state.security.validate(&token))
        .map_err(|e| {
            tracing::debug!(path = %request.uri().path(), reason = %e, "Request rejected");
            AppError::from(e)
        })?;

    // Insert authenticated caller into request extensions
    request.extensions_mut().insert(AuthUser { identity });

    // Continue to the next handler
    Ok(next.run(request).await)
}
