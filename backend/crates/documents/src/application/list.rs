//! List Documents Use Case
//!
//! Pure read-side queries; each call returns a snapshot, not a live view.

use std::sync::Arc;

use crate::domain::entity::document::{Document, DocumentStatus};
use crate::domain::repository::DocumentRepository;
use crate::error::DocumentResult;

/// Listing use case
pub struct ListDocumentsUseCase<D>
where
    D: DocumentRepository,
{
    doc_repo: Arc<D>,
}

impl<D> ListDocumentsUseCase<D>
where
    D: DocumentRepository,
{
    pub fn new(doc_repo: Arc<D>) -> Self {
        Self { doc_repo }
    }

    /// All documents
    pub async fn all(&self) -> DocumentResult<Vec<Document>> {
        self.doc_repo.list_all().await
    }

    /// Documents in one status
    pub async fn by_status(&self, status: DocumentStatus) -> DocumentResult<Vec<Document>> {
        self.doc_repo.list_by_status(status).await
    }
}
