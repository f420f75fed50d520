//! Chat construction and name validation.

use crate::domain::entities::{Chat, ChatError};
use crate::domain::value_objects::ChatId;

/// Default upper bound on chat name length, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

/// Builds [`Chat`] values with freshly generated ids.
///
/// The factory never touches a registry. Callers register the result
/// themselves, so a rejected name leaves every registry untouched.
#[derive(Debug, Clone)]
pub struct ChatFactory {
    max_name_length: usize,
}

impl Default for ChatFactory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_LENGTH)
    }
}

impl ChatFactory {
    pub fn new(max_name_length: usize) -> Self {
        Self { max_name_length }
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Create a chat with a new unique id.
    pub fn create(&self, name: &str) -> Result<Chat, ChatError> {
        let name = self.validate_name(name)?;
        Ok(Chat::new(ChatId::generate(), name))
    }

    /// Rebuild a chat that already has an id, e.g. when seeding a registry.
    pub fn restore(&self, id: ChatId, name: &str) -> Result<Chat, ChatError> {
        let name = self.validate_name(name)?;
        Ok(Chat::new(id, name))
    }

    /// Names are trimmed; blank or over-length names are rejected.
    fn validate_name(&self, name: &str) -> Result<String, ChatError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ChatError::Validation("Chat name must not be empty".into()));
        }

        let length = name.chars().count();
        if length > self.max_name_length {
            return Err(ChatError::Validation(format!(
                "Chat name must be at most {} characters, got {}",
                self.max_name_length, length
            )));
        }

        Ok(name.to_string())
    }
}
