//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::Credentials;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 32, message = "Username must be 1-32 characters"))]
    pub username: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: Option<String>,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials::new(request.username, request.password)
    }
}

/// Create chat request
///
/// Name rules live in `ChatFactory`, not here.
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub name: String,
}
