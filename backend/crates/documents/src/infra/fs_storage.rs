//! Filesystem File Storage
//!
//! Stores uploads under a configured directory with fresh `uuid.ext`
//! names and returns the resulting path as the locator.

use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::storage::{FileStorage, StorageError};

/// Local-filesystem storage backend
#[derive(Debug, Clone)]
pub struct FsFileStorage {
    root: PathBuf,
}

impl FsFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStorage for FsFileStorage {
    async fn store(&self, bytes: &[u8], original_filename: &str) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        // Never reuse the client-supplied name; keep only the extension
        let extension = original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        let unique_name = if extension.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            format!("{}.{}", Uuid::new_v4(), extension)
        };

        let path = self.root.join(unique_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "File stored");

        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_locator() {
        let dir = std::env::temp_dir().join(format!("doc-store-test-{}", Uuid::new_v4()));
        let storage = FsFileStorage::new(&dir);

        let locator = storage.store(b"%PDF-1.4 test", "facture.pdf").await.unwrap();
        assert!(locator.ends_with(".pdf"));

        let written = tokio::fs::read(&locator).await.unwrap();
        assert_eq!(written, b"%PDF-1.4 test");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_ignores_client_filename() {
        let dir = std::env::temp_dir().join(format!("doc-store-test-{}", Uuid::new_v4()));
        let storage = FsFileStorage::new(&dir);

        let locator = storage.store(b"data", "../escape.pdf").await.unwrap();
        assert!(!locator.contains(".."));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
