//! # Ephemeral Chat Library
//!
//! Backend for an ephemeral chat application:
//! - Token-based login guarding every state-changing endpoint
//! - Chat rooms with guaranteed-unique ids and consistent listings
//! - Image uploads handed to a pluggable storage backend
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Chat entity, ChatFactory, storage and repository traits
//! - **Application Layer**: SecurityModule and DTOs
//! - **Infrastructure Layer**: In-memory registry, file storage, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! ephemeral_chat/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, domain services
//! +-- application/    Security service and DTOs
//! +-- infrastructure/ Registry, storage adapters, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Security service
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
