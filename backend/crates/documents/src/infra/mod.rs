//! Infrastructure Layer
//!
//! Database and filesystem implementations.

pub mod fs_storage;
pub mod postgres;

pub use fs_storage::FsFileStorage;
pub use postgres::PgDocumentRepository;
