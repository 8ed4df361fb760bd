//! Validate Document Use Case
//!
//! The only mutation path for a document's status. The guard and the
//! write travel together in one atomic repository call; this use case
//! only disambiguates why no row was updated.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::domain::value_object::email::Email;
use chrono::Utc;
use kernel::id::DocumentId;

use crate::domain::entity::document::Document;
use crate::domain::repository::DocumentRepository;
use crate::error::{DocumentError, DocumentResult};

/// Validation use case
pub struct ValidateDocumentUseCase<D, U>
where
    D: DocumentRepository,
    U: UserRepository,
{
    doc_repo: Arc<D>,
    user_repo: Arc<U>,
}

impl<D, U> ValidateDocumentUseCase<D, U>
where
    D: DocumentRepository,
    U: UserRepository,
{
    pub fn new(doc_repo: Arc<D>, user_repo: Arc<U>) -> Self {
        Self { doc_repo, user_repo }
    }

    /// Validate a document on behalf of an accountant
    ///
    /// Fails with `NotFound` when the id does not resolve and with
    /// `AlreadyValidated` when the document was validated before —
    /// including by a concurrent request that won the atomic update.
    pub async fn execute(
        &self,
        id: DocumentId,
        validator_email: &Email,
        comment: Option<String>,
    ) -> DocumentResult<Document> {
        let validator = self
            .user_repo
            .find_by_email(validator_email)
            .await?
            .ok_or_else(|| DocumentError::Internal("Validator account not found".to_string()))?;

        let updated = self
            .doc_repo
            .mark_validated(&id, &validator.user_id, comment.as_deref(), Utc::now())
            .await?;

        match updated {
            Some(document) => {
                tracing::info!(
                    document_id = %document.document_id,
                    validator = %validator.email,
                    "Document validated"
                );
                Ok(document)
            }
            // No row matched the guard: missing id or already VALIDE
            None => match self.doc_repo.find_by_id(&id).await? {
                Some(_) => Err(DocumentError::AlreadyValidated),
                None => Err(DocumentError::NotFound),
            },
        }
    }
}
