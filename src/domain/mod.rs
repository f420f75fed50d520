//! # Domain Layer
//!
//! The domain layer contains the core business rules of the chat backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Chat and uploaded-file types with their storage contracts
//! - **value_objects**: Immutable value types (ChatId)
//! - **services**: Domain services (ChatFactory)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
