//! Chat Handlers

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::application::dto::request::CreateChatRequest;
use crate::application::dto::response::{ChatListResponse, ChatResponse};
use crate::domain::ChatId;
use crate::infrastructure::metrics;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all chats in insertion order
pub async fn list_chats(State(state): State<AppState>) -> Json<ChatListResponse> {
    Json(state.chats.list().into_iter().collect())
}

/// Create a new chat
pub async fn create_chat(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatResponse>), AppError> {
    let Json(body) = body?;

    // Nothing is registered unless the name is valid
    let chat = state.chat_factory.create(&body.name)?;
    state.chats.add(chat.clone())?;
    metrics::set_chats_registered(state.chats.len());

    info!(
        chat_id = %chat.id(),
        name = %chat.name(),
        subject = %auth.subject(),
        "Chat created"
    );

    Ok((StatusCode::CREATED, Json(ChatResponse::from(chat))))
}

/// Get chat by ID
pub async fn get_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatResponse>, AppError> {
    let chat_id = ChatId::parse(&chat_id)
        .ok_or_else(|| AppError::BadRequest("Invalid chat ID".into()))?;

    let chat = state.chats.get(&chat_id)?;

    Ok(Json(ChatResponse::from(chat)))
}
