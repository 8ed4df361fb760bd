//! File Storage Port
//!
//! Collaborator contract for the upload backend: store bytes, get back
//! a locator. File whitelisting and size limits are enforced by the
//! upload use case before this port is ever called.

use thiserror::Error;

/// File storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// File storage collaborator
#[trait_variant::make(FileStorage: Send)]
pub trait LocalFileStorage {
    /// Store the bytes and return a locator for later retrieval
    async fn store(&self, bytes: &[u8], original_filename: &str) -> Result<String, StorageError>;
}
