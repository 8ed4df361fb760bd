//! Unit tests for the documents crate
//!
//! Runs the upload/list/validate use cases against in-memory fakes, so
//! the lifecycle rules are exercised without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{DocumentId, SocietyId, UserId};
use uuid::Uuid;

use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;
use auth::domain::value_object::{email::Email, role::Role};
use auth::error::AuthResult;
use platform::password::ClearTextPassword;

use crate::application::config::DocumentConfig;
use crate::application::{ListDocumentsUseCase, UploadDocumentUseCase, UploadInput, ValidateDocumentUseCase};
use crate::domain::entity::document::{
    Document, DocumentMetadata, DocumentStatus, DocumentType,
};
use crate::domain::repository::DocumentRepository;
use crate::domain::storage::{FileStorage, StorageError};
use crate::domain::value_object::{
    amount::Amount, fiscal_year::FiscalYear, piece_number::PieceNumber,
};
use crate::error::DocumentError;

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryUsers {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl InMemoryUsers {
    fn with_user(self, user: User) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(user.email.as_str().to_string(), user);
        self
    }
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(user.email.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn exists_any(&self) -> AuthResult<bool> {
        Ok(!self.users.lock().unwrap().is_empty())
    }
}

#[derive(Clone, Default)]
struct InMemoryDocuments {
    docs: Arc<Mutex<HashMap<Uuid, Document>>>,
}

impl DocumentRepository for InMemoryDocuments {
    async fn create(&self, document: &Document) -> crate::error::DocumentResult<()> {
        self.docs
            .lock()
            .unwrap()
            .insert(*document.document_id.as_uuid(), document.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> crate::error::DocumentResult<Option<Document>> {
        Ok(self.docs.lock().unwrap().get(id.as_uuid()).cloned())
    }

    async fn list_all(&self) -> crate::error::DocumentResult<Vec<Document>> {
        Ok(self.docs.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> crate::error::DocumentResult<Vec<Document>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.statut == status)
            .cloned()
            .collect())
    }

    async fn mark_validated(
        &self,
        id: &DocumentId,
        validator: &UserId,
        comment: Option<&str>,
        validated_at: DateTime<Utc>,
    ) -> crate::error::DocumentResult<Option<Document>> {
        // The mutex makes the guard + write atomic, mirroring the
        // conditional UPDATE of the Postgres implementation
        let mut docs = self.docs.lock().unwrap();

        match docs.get_mut(id.as_uuid()) {
            Some(doc) if doc.statut != DocumentStatus::Valide => {
                doc.statut = DocumentStatus::Valide;
                doc.validated_by = Some(*validator);
                if let Some(comment) = comment {
                    doc.commentaire_comptable = Some(comment.to_string());
                }
                doc.date_validation = Some(validated_at);
                doc.date_modification = validated_at;
                Ok(Some(doc.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Clone, Default)]
struct RecordingStorage {
    stored: Arc<Mutex<Vec<String>>>,
}

impl RecordingStorage {
    fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

impl FileStorage for RecordingStorage {
    async fn store(&self, _bytes: &[u8], original_filename: &str) -> Result<String, StorageError> {
        let locator = format!("mem://{}/{}", Uuid::new_v4(), original_filename);
        self.stored.lock().unwrap().push(locator.clone());
        Ok(locator)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn password_hash() -> platform::password::HashedPassword {
    ClearTextPassword::new("MySecure#Pass2024".to_string())
        .unwrap()
        .hash(None)
        .unwrap()
}

fn society_user(society_id: SocietyId) -> User {
    let mut user = User::new(
        Email::new("user1@example.com").unwrap(),
        password_hash(),
        "Ahmed El Houcine",
        Some(society_id),
    );
    user.grant_role(Role::Society);
    user
}

fn accountant_user() -> User {
    let mut user = User::new(
        Email::new("comptable1@example.com").unwrap(),
        password_hash(),
        "Fatima Zahra",
        None,
    );
    user.grant_role(Role::Accountant);
    user
}

fn upload_input() -> UploadInput {
    UploadInput {
        metadata: DocumentMetadata {
            numero_piece: PieceNumber::new("FA-2024-0042").unwrap(),
            doc_type: DocumentType::FactureAchat,
            categorie_comptable: None,
            date_piece: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            montant: Amount::parse("1500.50").unwrap(),
            fournisseur: Some("Fournisseur SA".to_string()),
            exercice_comptable: FiscalYear::new("2024").unwrap(),
        },
        file_bytes: b"%PDF-1.4 fake invoice".to_vec(),
        file_name: Some("facture.pdf".to_string()),
        content_type: Some("application/pdf".to_string()),
    }
}

struct Harness {
    users: Arc<InMemoryUsers>,
    docs: Arc<InMemoryDocuments>,
    storage: Arc<RecordingStorage>,
    config: Arc<DocumentConfig>,
}

impl Harness {
    fn new(users: InMemoryUsers) -> Self {
        Self {
            users: Arc::new(users),
            docs: Arc::new(InMemoryDocuments::default()),
            storage: Arc::new(RecordingStorage::default()),
            config: Arc::new(DocumentConfig::default()),
        }
    }

    fn upload(&self) -> UploadDocumentUseCase<InMemoryUsers, InMemoryDocuments, RecordingStorage> {
        UploadDocumentUseCase::new(
            self.users.clone(),
            self.docs.clone(),
            self.storage.clone(),
            self.config.clone(),
        )
    }

    fn list(&self) -> ListDocumentsUseCase<InMemoryDocuments> {
        ListDocumentsUseCase::new(self.docs.clone())
    }

    fn validate(&self) -> ValidateDocumentUseCase<InMemoryDocuments, InMemoryUsers> {
        ValidateDocumentUseCase::new(self.docs.clone(), self.users.clone())
    }
}

fn uploader_email() -> Email {
    Email::new("user1@example.com").unwrap()
}

fn accountant_email() -> Email {
    Email::new("comptable1@example.com").unwrap()
}

// ============================================================================
// Lifecycle tests
// ============================================================================

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn upload_creates_pending_document() {
        let society_id = SocietyId::new();
        let harness = Harness::new(
            InMemoryUsers::default()
                .with_user(society_user(society_id))
                .with_user(accountant_user()),
        );

        let document = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap();

        assert_eq!(document.statut, DocumentStatus::EnAttente);
        assert_eq!(document.society_id, society_id);
        assert_eq!(harness.storage.stored_count(), 1);

        // Appears exactly once in the pending snapshot
        let pending = harness
            .list()
            .by_status(DocumentStatus::EnAttente)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].montant.centimes(), 150_050);

        let validated = harness
            .list()
            .by_status(DocumentStatus::Valide)
            .await
            .unwrap();
        assert!(validated.is_empty());
    }

    #[tokio::test]
    async fn validated_document_moves_between_snapshots() {
        let harness = Harness::new(
            InMemoryUsers::default()
                .with_user(society_user(SocietyId::new()))
                .with_user(accountant_user()),
        );

        let document = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap();

        let validated = harness
            .validate()
            .execute(document.document_id, &accountant_email(), None)
            .await
            .unwrap();

        assert_eq!(validated.statut, DocumentStatus::Valide);
        assert!(validated.date_validation.is_some());
        assert!(validated.validated_by.is_some());

        let pending = harness
            .list()
            .by_status(DocumentStatus::EnAttente)
            .await
            .unwrap();
        assert!(pending.is_empty());

        let done = harness
            .list()
            .by_status(DocumentStatus::Valide)
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
    }

    #[tokio::test]
    async fn validating_twice_is_an_error() {
        let harness = Harness::new(
            InMemoryUsers::default()
                .with_user(society_user(SocietyId::new()))
                .with_user(accountant_user()),
        );

        let document = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap();

        harness
            .validate()
            .execute(document.document_id, &accountant_email(), None)
            .await
            .unwrap();

        let err = harness
            .validate()
            .execute(document.document_id, &accountant_email(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::AlreadyValidated));
    }

    #[tokio::test]
    async fn concurrent_validations_yield_one_success() {
        let harness = Harness::new(
            InMemoryUsers::default()
                .with_user(society_user(SocietyId::new()))
                .with_user(accountant_user()),
        );

        let document = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap();

        let use_case = Arc::new(harness.validate());
        let id = document.document_id;

        let first = {
            let use_case = use_case.clone();
            tokio::spawn(async move { use_case.execute(id, &accountant_email(), None).await })
        };
        let second = {
            let use_case = use_case.clone();
            tokio::spawn(async move { use_case.execute(id, &accountant_email(), None).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let already = results
            .iter()
            .filter(|r| matches!(r, Err(DocumentError::AlreadyValidated)))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(already, 1);
    }

    #[tokio::test]
    async fn validating_unknown_document_is_not_found() {
        let harness = Harness::new(InMemoryUsers::default().with_user(accountant_user()));

        let err = harness
            .validate()
            .execute(DocumentId::new(), &accountant_email(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::NotFound));
    }

    #[tokio::test]
    async fn validation_comment_is_recorded() {
        let harness = Harness::new(
            InMemoryUsers::default()
                .with_user(society_user(SocietyId::new()))
                .with_user(accountant_user()),
        );

        let document = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap();

        let validated = harness
            .validate()
            .execute(
                document.document_id,
                &accountant_email(),
                Some("Conforme".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(validated.commentaire_comptable.as_deref(), Some("Conforme"));
    }
}

// ============================================================================
// Upload rejection tests
// ============================================================================

#[cfg(test)]
mod upload_rejection_tests {
    use super::*;

    #[tokio::test]
    async fn exe_is_rejected_before_storage() {
        let harness = Harness::new(
            InMemoryUsers::default().with_user(society_user(SocietyId::new())),
        );

        let mut input = upload_input();
        input.file_name = Some("malware.exe".to_string());

        let err = harness
            .upload()
            .execute(input, &uploader_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::ExtensionNotAllowed));
        assert_eq!(harness.storage.stored_count(), 0);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_before_storage() {
        let harness = Harness::new(
            InMemoryUsers::default().with_user(society_user(SocietyId::new())),
        );

        let mut input = upload_input();
        input.file_bytes = vec![0u8; 11 * 1024 * 1024]; // 11 MiB

        let err = harness
            .upload()
            .execute(input, &uploader_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::FileTooLarge));
        assert_eq!(harness.storage.stored_count(), 0);
    }

    #[tokio::test]
    async fn uploader_without_society_is_rejected() {
        // The accountant has no society: no document may be constructed
        let harness = Harness::new(InMemoryUsers::default().with_user(accountant_user()));

        let err = harness
            .upload()
            .execute(upload_input(), &accountant_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::MissingSociety));
        assert_eq!(harness.storage.stored_count(), 0);
        assert!(harness.list().all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let harness = Harness::new(
            InMemoryUsers::default().with_user(society_user(SocietyId::new())),
        );

        let mut input = upload_input();
        input.file_bytes = Vec::new();

        let err = harness
            .upload()
            .execute(input, &uploader_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::EmptyFile));
    }

    #[tokio::test]
    async fn wrong_mime_type_is_rejected() {
        let harness = Harness::new(
            InMemoryUsers::default().with_user(society_user(SocietyId::new())),
        );

        let mut input = upload_input();
        input.content_type = Some("application/octet-stream".to_string());

        let err = harness
            .upload()
            .execute(input, &uploader_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::MimeNotAllowed));
        assert_eq!(harness.storage.stored_count(), 0);
    }

    #[tokio::test]
    async fn unknown_uploader_is_rejected() {
        let harness = Harness::new(InMemoryUsers::default());

        let err = harness
            .upload()
            .execute(upload_input(), &uploader_email())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::UploaderNotFound));
        assert_eq!(harness.storage.stored_count(), 0);
    }
}
