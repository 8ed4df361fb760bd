//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod list;
pub mod upload;
pub mod validate;

// Re-exports
pub use config::DocumentConfig;
pub use list::ListDocumentsUseCase;
pub use upload::{UploadDocumentUseCase, UploadInput};
pub use validate::ValidateDocumentUseCase;
