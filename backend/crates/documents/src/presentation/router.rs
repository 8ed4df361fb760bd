//! Documents Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgAuthRepository;

use crate::application::config::DocumentConfig;
use crate::domain::repository::DocumentRepository;
use crate::domain::storage::FileStorage;
use crate::infra::fs_storage::FsFileStorage;
use crate::infra::postgres::PgDocumentRepository;
use crate::presentation::handlers::{self, DocumentAppState};

/// Create the Documents router with PostgreSQL repositories and
/// filesystem storage
pub fn documents_router(
    user_repo: PgAuthRepository,
    doc_repo: PgDocumentRepository,
    config: DocumentConfig,
) -> Router {
    let storage = FsFileStorage::new(config.upload_dir.clone());
    documents_router_generic(user_repo, doc_repo, storage, config)
}

/// Create a generic Documents router for any implementations
pub fn documents_router_generic<U, D, S>(
    user_repo: U,
    doc_repo: D,
    storage: S,
    config: DocumentConfig,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    D: DocumentRepository + Clone + Send + Sync + 'static,
    S: FileStorage + Clone + Send + Sync + 'static,
{
    let state = DocumentAppState {
        user_repo: Arc::new(user_repo),
        doc_repo: Arc::new(doc_repo),
        storage: Arc::new(storage),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_documents::<U, D, S>))
        .route("/upload", post(handlers::upload_document::<U, D, S>))
        .route(
            "/comptable/status",
            get(handlers::list_by_status::<U, D, S>),
        )
        .route(
            "/comptable/valider/{id}",
            get(handlers::validate_document::<U, D, S>)
                .post(handlers::validate_document::<U, D, S>),
        )
        .with_state(state)
}
