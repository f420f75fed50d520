//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **ChatFactory**: Chat name validation and unique id assignment

mod chat_factory;

pub use chat_factory::*;
