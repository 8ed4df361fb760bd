//! Document Error Types
//!
//! This module provides document-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Business-rule failures carry specific, user-actionable messages;
//! storage and database failures surface as a generic internal error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::storage::StorageError;

/// Document-specific result type alias
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document-specific error variants
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document id does not resolve
    #[error("Document not found")]
    NotFound,

    /// The document has already been validated
    #[error("Document is already validated")]
    AlreadyValidated,

    /// The uploader account does not resolve
    #[error("Uploader not found")]
    UploaderNotFound,

    /// The uploader has no associated society
    #[error("Uploader has no associated society")]
    MissingSociety,

    /// The file part is missing or has no content
    #[error("File is empty or missing")]
    EmptyFile,

    /// The file part carries no filename
    #[error("Filename is missing")]
    MissingFilename,

    /// The file exceeds the size limit
    #[error("File exceeds the size limit")]
    FileTooLarge,

    /// The file extension is not whitelisted
    #[error("File extension not allowed")]
    ExtensionNotAllowed,

    /// The declared mime type is not whitelisted
    #[error("Mime type not allowed")]
    MimeNotAllowed,

    /// Metadata part failed validation
    #[error("Invalid document metadata: {0}")]
    InvalidMetadata(String),

    /// File storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocumentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::NotFound => StatusCode::NOT_FOUND,
            DocumentError::AlreadyValidated => StatusCode::CONFLICT,
            DocumentError::UploaderNotFound
            | DocumentError::MissingSociety
            | DocumentError::EmptyFile
            | DocumentError::MissingFilename
            | DocumentError::FileTooLarge
            | DocumentError::ExtensionNotAllowed
            | DocumentError::MimeNotAllowed
            | DocumentError::InvalidMetadata(_) => StatusCode::BAD_REQUEST,
            DocumentError::Storage(_)
            | DocumentError::Database(_)
            | DocumentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::NotFound => ErrorKind::NotFound,
            DocumentError::AlreadyValidated => ErrorKind::Conflict,
            DocumentError::UploaderNotFound
            | DocumentError::MissingSociety
            | DocumentError::EmptyFile
            | DocumentError::MissingFilename
            | DocumentError::FileTooLarge
            | DocumentError::ExtensionNotAllowed
            | DocumentError::MimeNotAllowed
            | DocumentError::InvalidMetadata(_) => ErrorKind::BadRequest,
            DocumentError::Storage(_)
            | DocumentError::Database(_)
            | DocumentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with the client-facing message
    pub fn to_app_error(&self) -> AppError {
        match self {
            DocumentError::NotFound => AppError::not_found("Document non trouvé"),
            DocumentError::AlreadyValidated => {
                AppError::conflict("Le document est déjà validé")
            }
            DocumentError::UploaderNotFound => AppError::bad_request("Utilisateur non trouvé"),
            DocumentError::MissingSociety => {
                AppError::bad_request("L'utilisateur doit être associé à une société")
            }
            DocumentError::EmptyFile => {
                AppError::bad_request("Le fichier est vide ou n'existe pas")
            }
            DocumentError::MissingFilename => {
                AppError::bad_request("Le nom du fichier est invalide")
            }
            DocumentError::FileTooLarge => {
                AppError::bad_request("La taille du fichier dépasse la limite de 10MB")
            }
            DocumentError::ExtensionNotAllowed => AppError::bad_request(
                "Type de fichier non autorisé. Formats acceptés : PDF, JPG, JPEG, PNG",
            ),
            DocumentError::MimeNotAllowed => AppError::bad_request(
                "Type MIME non autorisé. Formats acceptés : PDF et images (JPG, PNG)",
            ),
            DocumentError::InvalidMetadata(msg) => AppError::bad_request(msg.clone()),
            DocumentError::Storage(_)
            | DocumentError::Database(_)
            | DocumentError::Internal(_) => {
                AppError::internal("Une erreur est survenue lors du traitement du document")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DocumentError::Database(e) => {
                tracing::error!(error = %e, "Document database error");
            }
            DocumentError::Storage(e) => {
                tracing::error!(error = %e, "Document storage error");
            }
            DocumentError::Internal(msg) => {
                tracing::error!(message = %msg, "Document internal error");
            }
            DocumentError::AlreadyValidated => {
                tracing::warn!("Attempt to re-validate a validated document");
            }
            _ => {
                tracing::debug!(error = %self, "Document error");
            }
        }
    }
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Metadata value-object failures become InvalidMetadata with the
/// value object's own message
impl From<AppError> for DocumentError {
    fn from(err: AppError) -> Self {
        DocumentError::InvalidMetadata(err.message().to_string())
    }
}

/// User lookups go through the auth repository; its failures are
/// infrastructure errors from this crate's point of view
impl From<auth::AuthError> for DocumentError {
    fn from(err: auth::AuthError) -> Self {
        DocumentError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors_are_distinct() {
        assert_eq!(DocumentError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DocumentError::AlreadyValidated.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        for err in [
            DocumentError::EmptyFile,
            DocumentError::MissingFilename,
            DocumentError::FileTooLarge,
            DocumentError::ExtensionNotAllowed,
            DocumentError::MimeNotAllowed,
            DocumentError::MissingSociety,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = DocumentError::Internal("connection pool exhausted".to_string());
        let app = err.to_app_error();
        assert!(!app.message().contains("pool"));
    }
}
