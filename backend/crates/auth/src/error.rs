//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Credential failures (unknown user, disabled account, wrong password)
//! deliberately collapse into one client-facing INVALID_CREDENTIALS
//! response: the caller must not learn which check failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user record for the submitted email
    #[error("Unknown user")]
    UnknownUser,

    /// Account exists but is deactivated
    #[error("Account is disabled")]
    Inactive,

    /// Password hash comparison failed
    #[error("Invalid credentials")]
    BadCredentials,

    /// Bearer token rejected (malformed, tampered, expired, dead subject)
    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    /// No authenticated principal on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated principal lacks the required role
    #[error("Insufficient role")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UnknownUser
            | AuthError::Inactive
            | AuthError::BadCredentials
            | AuthError::Token(_)
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UnknownUser
            | AuthError::Inactive
            | AuthError::BadCredentials
            | AuthError::Token(_)
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// All three credential failure causes produce the exact same wire
    /// body; token failures and missing authentication share one generic
    /// unauthorized message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UnknownUser | AuthError::Inactive | AuthError::BadCredentials => {
                AppError::unauthorized("Email ou mot de passe incorrect")
                    .with_code("INVALID_CREDENTIALS")
            }
            AuthError::Token(_) | AuthError::Unauthenticated => {
                AppError::unauthorized("Authentification requise")
            }
            AuthError::Forbidden => AppError::forbidden("Accès refusé"),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Une erreur interne est survenue")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::UnknownUser => {
                tracing::warn!("Login attempt for unknown user");
            }
            AuthError::Inactive => {
                tracing::warn!("Login attempt on disabled account");
            }
            AuthError::BadCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
