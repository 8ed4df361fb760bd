//! Upload Document Use Case
//!
//! Validates the file, checks the uploader's society affiliation, stores
//! the bytes, and creates the EN_ATTENTE document. Every rejection
//! happens before the storage collaborator is called, and a society-less
//! uploader is rejected before any Document is constructed.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::domain::value_object::email::Email;

use crate::application::config::DocumentConfig;
use crate::domain::entity::document::{Document, DocumentMetadata, FileInfo};
use crate::domain::repository::DocumentRepository;
use crate::domain::storage::FileStorage;
use crate::error::{DocumentError, DocumentResult};

/// Upload input: validated metadata plus the raw file part
pub struct UploadInput {
    pub metadata: DocumentMetadata,
    pub file_bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Upload use case
pub struct UploadDocumentUseCase<U, D, S>
where
    U: UserRepository,
    D: DocumentRepository,
    S: FileStorage,
{
    user_repo: Arc<U>,
    doc_repo: Arc<D>,
    storage: Arc<S>,
    config: Arc<DocumentConfig>,
}

impl<U, D, S> UploadDocumentUseCase<U, D, S>
where
    U: UserRepository,
    D: DocumentRepository,
    S: FileStorage,
{
    pub fn new(
        user_repo: Arc<U>,
        doc_repo: Arc<D>,
        storage: Arc<S>,
        config: Arc<DocumentConfig>,
    ) -> Self {
        Self {
            user_repo,
            doc_repo,
            storage,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: UploadInput,
        uploader_email: &Email,
    ) -> DocumentResult<Document> {
        let (file_name, content_type) = self.validate_file(&input)?;

        let uploader = self
            .user_repo
            .find_by_email(uploader_email)
            .await?
            .ok_or(DocumentError::UploaderNotFound)?;

        // An uploader without a society cannot create documents at all
        let society_id = uploader.society_id.ok_or(DocumentError::MissingSociety)?;

        let locator = self.storage.store(&input.file_bytes, &file_name).await?;

        let document = Document::new(
            input.metadata,
            FileInfo {
                chemin_fichier: locator,
                nom_fichier_original: file_name,
                type_fichier: content_type,
                taille_fichier: input.file_bytes.len() as i64,
            },
            society_id,
            uploader.user_id,
        );

        self.doc_repo.create(&document).await?;

        tracing::info!(
            document_id = %document.document_id,
            uploader = %uploader.email,
            numero_piece = %document.numero_piece,
            "Document uploaded"
        );

        Ok(document)
    }

    /// File constraints, checked in order before any side effect:
    /// non-empty, named, within 10 MiB, whitelisted extension and mime
    fn validate_file(&self, input: &UploadInput) -> DocumentResult<(String, String)> {
        if input.file_bytes.is_empty() {
            return Err(DocumentError::EmptyFile);
        }

        let file_name = input
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(DocumentError::MissingFilename)?;

        if input.file_bytes.len() > self.config.max_file_size {
            return Err(DocumentError::FileTooLarge);
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or(DocumentError::ExtensionNotAllowed)?;

        if !self.config.allowed_extensions.contains(&extension.as_str()) {
            return Err(DocumentError::ExtensionNotAllowed);
        }

        let content_type = input
            .content_type
            .as_deref()
            .map(|m| m.to_lowercase())
            .ok_or(DocumentError::MimeNotAllowed)?;

        if !self.config.allowed_mime_types.contains(&content_type.as_str()) {
            return Err(DocumentError::MimeNotAllowed);
        }

        Ok((file_name.to_string(), content_type))
    }
}
