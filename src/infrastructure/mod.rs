//! Infrastructure Layer
//!
//! Contains implementations of the domain contracts:
//! - In-memory chat registry
//! - File storage adapters (memory, local disk)
//! - Prometheus metrics

pub mod metrics;
pub mod registry;
pub mod storage;
