//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{DocumentId, SocietyId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::document::{Document, DocumentStatus, DocumentType};
use crate::domain::repository::DocumentRepository;
use crate::domain::value_object::{
    amount::Amount, fiscal_year::FiscalYear, piece_number::PieceNumber,
};
use crate::error::{DocumentError, DocumentResult};

/// Columns selected for every document read
const DOCUMENT_COLUMNS: &str = r#"
    document_id,
    numero_piece,
    doc_type,
    categorie_comptable,
    date_piece,
    montant_centimes,
    fournisseur,
    exercice_comptable,
    chemin_fichier,
    nom_fichier_original,
    type_fichier,
    taille_fichier,
    statut,
    commentaire_comptable,
    society_id,
    uploaded_by,
    validated_by,
    date_validation,
    date_creation,
    date_modification
"#;

/// PostgreSQL-backed document repository
#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, document: &Document) -> DocumentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                document_id,
                numero_piece,
                doc_type,
                categorie_comptable,
                date_piece,
                montant_centimes,
                fournisseur,
                exercice_comptable,
                chemin_fichier,
                nom_fichier_original,
                type_fichier,
                taille_fichier,
                statut,
                commentaire_comptable,
                society_id,
                uploaded_by,
                validated_by,
                date_validation,
                date_creation,
                date_modification
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(document.document_id.as_uuid())
        .bind(document.numero_piece.as_str())
        .bind(document.doc_type.code())
        .bind(&document.categorie_comptable)
        .bind(document.date_piece)
        .bind(document.montant.centimes())
        .bind(&document.fournisseur)
        .bind(document.exercice_comptable.as_str())
        .bind(&document.chemin_fichier)
        .bind(&document.nom_fichier_original)
        .bind(&document.type_fichier)
        .bind(document.taille_fichier)
        .bind(document.statut.code())
        .bind(&document.commentaire_comptable)
        .bind(document.society_id.as_uuid())
        .bind(document.uploaded_by.as_uuid())
        .bind(document.validated_by.as_ref().map(|id| *id.as_uuid()))
        .bind(document.date_validation)
        .bind(document.date_creation)
        .bind(document.date_modification)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DocumentId) -> DocumentResult<Option<Document>> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE document_id = $1"
        );

        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_document()).transpose()
    }

    async fn list_all(&self) -> DocumentResult<Vec<Document>> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY date_creation DESC"
        );

        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_document()).collect()
    }

    async fn list_by_status(&self, status: DocumentStatus) -> DocumentResult<Vec<Document>> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE statut = $1 ORDER BY date_creation DESC"
        );

        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(status.code())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_document()).collect()
    }

    async fn mark_validated(
        &self,
        id: &DocumentId,
        validator: &UserId,
        comment: Option<&str>,
        validated_at: DateTime<Utc>,
    ) -> DocumentResult<Option<Document>> {
        // Guard and write in one statement: of two racing validators,
        // only one sees a row where statut is still not VALIDE.
        let query = format!(
            r#"
            UPDATE documents SET
                statut = $2,
                validated_by = $3,
                commentaire_comptable = COALESCE($4, commentaire_comptable),
                date_validation = $5,
                date_modification = $5
            WHERE document_id = $1 AND statut <> $2
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id.as_uuid())
            .bind(DocumentStatus::Valide.code())
            .bind(validator.as_uuid())
            .bind(comment)
            .bind(validated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_document()).transpose()
    }
}

// ============================================================================
// Row type
// ============================================================================

#[derive(sqlx::FromRow)]
struct DocumentRow {
    document_id: Uuid,
    numero_piece: String,
    doc_type: String,
    categorie_comptable: Option<String>,
    date_piece: NaiveDate,
    montant_centimes: i64,
    fournisseur: Option<String>,
    exercice_comptable: String,
    chemin_fichier: String,
    nom_fichier_original: String,
    type_fichier: String,
    taille_fichier: i64,
    statut: String,
    commentaire_comptable: Option<String>,
    society_id: Uuid,
    uploaded_by: Uuid,
    validated_by: Option<Uuid>,
    date_validation: Option<DateTime<Utc>>,
    date_creation: DateTime<Utc>,
    date_modification: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self) -> DocumentResult<Document> {
        let doc_type = DocumentType::from_code(&self.doc_type).ok_or_else(|| {
            DocumentError::Internal(format!("Unknown document type: {}", self.doc_type))
        })?;

        let statut = DocumentStatus::from_code(&self.statut).ok_or_else(|| {
            DocumentError::Internal(format!("Unknown document status: {}", self.statut))
        })?;

        Ok(Document {
            document_id: DocumentId::from_uuid(self.document_id),
            numero_piece: PieceNumber::from_db(self.numero_piece),
            doc_type,
            categorie_comptable: self.categorie_comptable,
            date_piece: self.date_piece,
            montant: Amount::from_centimes(self.montant_centimes),
            fournisseur: self.fournisseur,
            exercice_comptable: FiscalYear::from_db(self.exercice_comptable),
            chemin_fichier: self.chemin_fichier,
            nom_fichier_original: self.nom_fichier_original,
            type_fichier: self.type_fichier,
            taille_fichier: self.taille_fichier,
            statut,
            commentaire_comptable: self.commentaire_comptable,
            society_id: SocietyId::from_uuid(self.society_id),
            uploaded_by: UserId::from_uuid(self.uploaded_by),
            validated_by: self.validated_by.map(UserId::from_uuid),
            date_validation: self.date_validation,
            date_creation: self.date_creation,
            date_modification: self.date_modification,
        })
    }
}
