//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **ChatId**: Opaque, randomly generated chat identifier

mod chat_id;

pub use chat_id::*;
