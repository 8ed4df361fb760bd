//! HTTP Handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use kernel::id::DocumentId;
use std::sync::Arc;
use uuid::Uuid;

use auth::domain::entity::principal::Principal;
use auth::domain::repository::UserRepository;

use crate::application::config::DocumentConfig;
use crate::application::{ListDocumentsUseCase, UploadDocumentUseCase, UploadInput, ValidateDocumentUseCase};
use crate::domain::entity::document::DocumentStatus;
use crate::domain::repository::DocumentRepository;
use crate::domain::storage::FileStorage;
use crate::error::{DocumentError, DocumentResult};
use crate::presentation::dto::{DocumentUploadRequest, DocumentView, StatusQuery};

/// Multipart part names of the upload endpoint
const METADATA_PART: &str = "document";
const FILE_PART: &str = "file";

/// Shared state for document handlers
#[derive(Clone)]
pub struct DocumentAppState<U, D, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    pub user_repo: Arc<U>,
    pub doc_repo: Arc<D>,
    pub storage: Arc<S>,
    pub config: Arc<DocumentConfig>,
}

// ============================================================================
// Upload
// ============================================================================

/// POST /api/documents/upload
///
/// Multipart body: a `document` part (JSON metadata) and a `file` part.
pub async fn upload_document<U, D, S>(
    State(state): State<DocumentAppState<U, D, S>>,
    Extension(principal): Extension<Principal>,
    mut multipart: Multipart,
) -> DocumentResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    let mut request: Option<DocumentUploadRequest> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DocumentError::InvalidMetadata(format!("Corps multipart invalide: {e}")))?
    {
        let part_name = field.name().map(str::to_string);

        match part_name.as_deref() {
            Some(METADATA_PART) => {
                let bytes = field.bytes().await.map_err(|e| {
                    DocumentError::InvalidMetadata(format!("Corps multipart invalide: {e}"))
                })?;
                request = Some(serde_json::from_slice(&bytes).map_err(|e| {
                    DocumentError::InvalidMetadata(format!(
                        "Les métadonnées du document sont invalides: {e}"
                    ))
                })?);
            }
            Some(FILE_PART) => {
                file_name = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    DocumentError::InvalidMetadata(format!("Corps multipart invalide: {e}"))
                })?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let request = request.ok_or_else(|| {
        DocumentError::InvalidMetadata("La partie 'document' est obligatoire".to_string())
    })?;
    let file_bytes = file_bytes.ok_or(DocumentError::EmptyFile)?;

    let metadata = request.into_metadata(Utc::now().date_naive())?;

    let use_case = UploadDocumentUseCase::new(
        state.user_repo.clone(),
        state.doc_repo.clone(),
        state.storage.clone(),
        state.config.clone(),
    );

    let input = UploadInput {
        metadata,
        file_bytes,
        file_name,
        content_type,
    };

    let document = use_case.execute(input, &principal.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentView::from_document(&document)),
    ))
}

// ============================================================================
// Listing
// ============================================================================

/// GET /api/documents
pub async fn list_documents<U, D, S>(
    State(state): State<DocumentAppState<U, D, S>>,
) -> DocumentResult<Json<Vec<DocumentView>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    let use_case = ListDocumentsUseCase::new(state.doc_repo.clone());

    let documents = use_case.all().await?;

    Ok(Json(documents.iter().map(DocumentView::from_document).collect()))
}

/// GET /api/documents/comptable/status?status=EN_ATTENTE|VALIDE|REJETE
pub async fn list_by_status<U, D, S>(
    State(state): State<DocumentAppState<U, D, S>>,
    Query(query): Query<StatusQuery>,
) -> DocumentResult<Json<Vec<DocumentView>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    let status = query.status.unwrap_or(DocumentStatus::EnAttente);

    let use_case = ListDocumentsUseCase::new(state.doc_repo.clone());

    let documents = use_case.by_status(status).await?;

    Ok(Json(documents.iter().map(DocumentView::from_document).collect()))
}

// ============================================================================
// Validation
// ============================================================================

/// GET|POST /api/documents/comptable/valider/{id}
pub async fn validate_document<U, D, S>(
    State(state): State<DocumentAppState<U, D, S>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> DocumentResult<Json<DocumentView>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    let use_case =
        ValidateDocumentUseCase::new(state.doc_repo.clone(), state.user_repo.clone());

    let document = use_case
        .execute(DocumentId::from_uuid(id), &principal.email, None)
        .await?;

    Ok(Json(DocumentView::from_document(&document)))
}
