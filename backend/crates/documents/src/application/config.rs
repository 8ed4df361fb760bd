//! Application Configuration
//!
//! Configuration for the Documents application layer.

use std::path::PathBuf;

/// Maximum upload size: 10 MiB
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Whitelisted file extensions
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Whitelisted mime types
pub const ALLOWED_MIME_TYPES: &[&str] =
    &["application/pdf", "image/jpeg", "image/jpg", "image/png"];

/// Documents application configuration
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Directory the filesystem storage writes into
    pub upload_dir: PathBuf,
    /// Maximum accepted file size in bytes
    pub max_file_size: usize,
    /// Accepted file extensions (lowercase)
    pub allowed_extensions: &'static [&'static str],
    /// Accepted mime types (lowercase)
    pub allowed_mime_types: &'static [&'static str],
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_file_size: MAX_FILE_SIZE,
            allowed_extensions: ALLOWED_EXTENSIONS,
            allowed_mime_types: ALLOWED_MIME_TYPES,
        }
    }
}

impl DocumentConfig {
    /// Config with a custom upload directory
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = DocumentConfig::default();
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert!(config.allowed_extensions.contains(&"pdf"));
        assert!(!config.allowed_extensions.contains(&"exe"));
    }
}
