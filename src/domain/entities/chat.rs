//! Chat entity and repository trait.

use serde::Serialize;

use crate::domain::value_objects::ChatId;

/// A chat room.
///
/// The id never changes after construction. Values are only produced by
/// [`ChatFactory`](crate::domain::services::ChatFactory), so a `Chat` always
/// carries a validated, non-empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chat {
    id: ChatId,
    name: String,
}

impl Chat {
    /// Only the factory builds chats; it has already validated `name`.
    pub(crate) fn new(id: ChatId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &ChatId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Chat registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid chat: {0}")]
    Validation(String),

    #[error("Chat {0} not found")]
    NotFound(ChatId),

    #[error("Chat id {0} is already registered")]
    Conflict(ChatId),
}

/// The authoritative collection of known chats.
///
/// Methods are synchronous. An `add` has no await point and always runs to
/// completion even if the caller's request is dropped.
pub trait ChatRepository: Send + Sync {
    /// Register a chat. Fails with [`ChatError::Conflict`] when its id is
    /// already present; the check and the insert are one atomic step.
    fn add(&self, chat: Chat) -> Result<(), ChatError>;

    /// Look up a chat by id.
    fn get(&self, id: &ChatId) -> Result<Chat, ChatError>;

    /// Snapshot of every chat in insertion order.
    fn list(&self) -> Vec<Chat>;

    /// Number of registered chats.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
