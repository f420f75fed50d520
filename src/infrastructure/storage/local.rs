//! Local filesystem storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{FileReference, FileStorage, StorageError};

/// Writes each upload to its own file under a root directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// File extension for common image types, `bin` otherwise.
fn extension_for(content_type: &str) -> &'static str {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        _ => "bin",
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<FileReference, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let id = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));
        let path = self.root.join(&id);
        let size = bytes.len();

        tokio::fs::write(&path, &bytes).await?;
        debug!(path = %path.display(), "Upload written");

        Ok(FileReference {
            url: super::join_url(&self.public_base_url, &id),
            id,
            content_type: content_type.to_string(),
            size,
        })
    }
}
