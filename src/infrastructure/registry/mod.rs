//! Chat Registry
//!
//! In-memory implementation of the domain `ChatRepository` contract.

mod chat_registry;

pub use chat_registry::ChatRegistry;
