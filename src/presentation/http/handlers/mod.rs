//! HTTP Handlers
//!
//! Thin adapters from HTTP requests to the security, chat and storage
//! services. No business rules live here.

pub mod auth;
pub mod chat;
pub mod health;
pub mod upload;
