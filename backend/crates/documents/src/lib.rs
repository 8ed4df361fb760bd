//! Documents Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Document entity, lifecycle guards, repository/storage traits
//! - `application/` - Upload, listing and validation use cases
//! - `infra/` - Database and filesystem implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Lifecycle Model
//! - Every document is created EN_ATTENTE by a society-affiliated uploader
//! - EN_ATTENTE moves to VALIDE exactly once; re-validating is an error
//! - The status write is an atomic guarded update: two racing validators
//!   get exactly one success
//! - File constraints (10 MiB, pdf/jpg/jpeg/png) are enforced before the
//!   storage collaborator is ever called

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::DocumentConfig;
pub use error::{DocumentError, DocumentResult};
pub use infra::fs_storage::FsFileStorage;
pub use infra::postgres::PgDocumentRepository;
pub use presentation::router::documents_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgDocumentRepository as DocumentStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
