//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::AccessToken;
use crate::domain::{Chat, FileReference};

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            expires_in: token.expires_in(),
            token: token.token,
            token_type: "Bearer",
        }
    }
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub name: String,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id().to_string(),
            name: chat.name().to_string(),
        }
    }
}

/// Chat list response
#[derive(Debug, Serialize)]
pub struct ChatListResponse {
    pub chats: Vec<ChatResponse>,
}

impl FromIterator<Chat> for ChatListResponse {
    fn from_iter<I: IntoIterator<Item = Chat>>(chats: I) -> Self {
        Self {
            chats: chats.into_iter().map(ChatResponse::from).collect(),
        }
    }
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

impl From<FileReference> for UploadResponse {
    fn from(reference: FileReference) -> Self {
        Self {
            id: reference.id,
            url: reference.url,
            content_type: reference.content_type,
            size: reference.size,
        }
    }
}
