//! Application Layer
//!
//! Contains the security service and data transfer objects (DTOs).
//! This layer sits between the presentation and domain layers.

pub mod services;
pub mod dto;
