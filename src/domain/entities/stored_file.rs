//! Uploaded file references and the storage port.

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// Handle to a stored file, returned to the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Storage-assigned identifier
    pub id: String,

    /// Where clients can fetch the file
    pub url: String,

    /// MIME type recorded at upload time
    pub content_type: String,

    /// Size in bytes
    pub size: usize,
}

/// Storage failures. Independent from registry state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Binary storage for uploaded files.
///
/// Implementations may be slow or remote. Callers must not hold any
/// registry lock across `store`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<FileReference, StorageError>;
}

/// Check if a MIME type denotes an image.
pub fn is_image(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}
