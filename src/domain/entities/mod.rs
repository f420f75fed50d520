//! # Domain Entities
//!
//! Core domain entities of the chat backend.
//!
//! - **Chat**: A chat room with an immutable id and a display name
//! - **FileReference**: Handle to an uploaded image
//!
//! Each entity comes with the contract its backing store must honour:
//! [`ChatRepository`] for chats and [`FileStorage`] for uploads. Both are
//! implemented in the infrastructure layer.

mod chat;
mod stored_file;

pub use chat::{Chat, ChatError, ChatRepository};

pub use stored_file::{is_image, FileReference, FileStorage, StorageError};
