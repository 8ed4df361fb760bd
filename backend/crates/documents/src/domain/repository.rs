//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{DocumentId, UserId};

use crate::domain::entity::document::{Document, DocumentStatus};
use crate::error::DocumentResult;

/// Document repository trait
#[trait_variant::make(DocumentRepository: Send)]
pub trait LocalDocumentRepository {
    /// Persist a new document
    async fn create(&self, document: &Document) -> DocumentResult<()>;

    /// Find a document by id
    async fn find_by_id(&self, id: &DocumentId) -> DocumentResult<Option<Document>>;

    /// Snapshot of all documents
    async fn list_all(&self) -> DocumentResult<Vec<Document>>;

    /// Snapshot of documents in a given status
    async fn list_by_status(&self, status: DocumentStatus) -> DocumentResult<Vec<Document>>;

    /// Atomically flip an unvalidated document to VALIDE
    ///
    /// The already-validated guard and the status write must be one
    /// read-modify-write against the store: of two concurrent calls on
    /// the same document, exactly one observes the unvalidated row.
    /// Returns `None` when no row matched the guard — the document is
    /// either missing or already VALIDE, which the caller disambiguates.
    async fn mark_validated(
        &self,
        id: &DocumentId,
        validator: &UserId,
        comment: Option<&str>,
        validated_at: DateTime<Utc>,
    ) -> DocumentResult<Option<Document>>;
}
