//! In-memory chat registry.
//!
//! A single `RwLock` guards both the id index and the insertion-ordered
//! list, so the uniqueness check and the insert happen under one write
//! guard and readers only ever see fully inserted chats.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Chat, ChatError, ChatId, ChatRepository};

#[derive(Debug, Default)]
struct RegistryInner {
    /// Position of each chat in `chats`
    index: HashMap<ChatId, usize>,
    chats: Vec<Chat>,
}

/// Process-local [`ChatRepository`].
///
/// Owned by whoever builds the application state and handed to handlers
/// through it; independent instances never share data.
#[derive(Debug, Default)]
pub struct ChatRegistry {
    inner: RwLock<RegistryInner>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry from an external source.
    ///
    /// Every chat goes through [`ChatRepository::add`]. The first duplicate
    /// aborts the restore; chats inserted before it stay registered.
    pub fn restore<I>(&self, chats: I) -> Result<usize, ChatError>
    where
        I: IntoIterator<Item = Chat>,
    {
        let mut restored = 0;
        for chat in chats {
            self.add(chat)?;
            restored += 1;
        }
        Ok(restored)
    }
}

impl ChatRepository for ChatRegistry {
    fn add(&self, chat: Chat) -> Result<(), ChatError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        match inner.index.entry(chat.id().clone()) {
            Entry::Occupied(existing) => Err(ChatError::Conflict(existing.key().clone())),
            Entry::Vacant(slot) => {
                debug!(chat_id = %chat.id(), name = %chat.name(), "Chat registered");
                slot.insert(inner.chats.len());
                inner.chats.push(chat);
                Ok(())
            }
        }
    }

    fn get(&self, id: &ChatId) -> Result<Chat, ChatError> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .map(|&position| inner.chats[position].clone())
            .ok_or_else(|| ChatError::NotFound(id.clone()))
    }

    fn list(&self) -> Vec<Chat> {
        self.inner.read().chats.clone()
    }

    fn len(&self) -> usize {
        self.inner.read().chats.len()
    }
}
