//! File Storage
//!
//! Adapters for the domain `FileStorage` port.

mod local;
mod memory;

pub use local::LocalFileStorage;
pub use memory::{InMemoryFileStorage, StoredBlob};

use std::sync::Arc;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::FileStorage;

/// Build the storage adapter selected in settings.
pub fn create_file_storage(settings: &StorageSettings) -> Arc<dyn FileStorage> {
    match settings.backend {
        StorageBackend::Memory => Arc::new(InMemoryFileStorage::new(&settings.public_base_url)),
        StorageBackend::Local => Arc::new(LocalFileStorage::new(
            &settings.directory,
            &settings.public_base_url,
        )),
    }
}

fn join_url(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}
