//! In-memory file storage.

use async_trait::async_trait;
use axum::body::Bytes;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{FileReference, FileStorage, StorageError};

/// A stored blob with its MIME type.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Keeps uploads in process memory. Contents die with the process.
#[derive(Debug)]
pub struct InMemoryFileStorage {
    files: DashMap<String, StoredBlob>,
    public_base_url: String,
}

impl InMemoryFileStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            files: DashMap::new(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Fetch a stored blob by id.
    pub fn get(&self, id: &str) -> Option<StoredBlob> {
        self.files.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<FileReference, StorageError> {
        let id = Uuid::new_v4().to_string();
        let size = bytes.len();

        self.files.insert(
            id.clone(),
            StoredBlob {
                content_type: content_type.to_string(),
                bytes,
            },
        );

        Ok(FileReference {
            url: super::join_url(&self.public_base_url, &id),
            id,
            content_type: content_type.to_string(),
            size,
        })
    }
}
