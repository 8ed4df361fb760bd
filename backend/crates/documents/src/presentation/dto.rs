//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::document::{
    Document, DocumentMetadata, DocumentStatus, DocumentType,
};
use crate::domain::value_object::{
    amount::Amount, fiscal_year::FiscalYear, piece_number::PieceNumber,
};
use crate::error::{DocumentError, DocumentResult};

/// Constant success message carried by document views
const UPLOAD_SUCCESS_MESSAGE: &str = "Document uploadé avec succès";

// ============================================================================
// Upload
// ============================================================================

/// JSON shape of the `document` multipart part
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadRequest {
    pub numero_piece: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub categorie_comptable: Option<String>,
    pub date_piece: NaiveDate,
    /// Raw JSON number, validated into an [`Amount`]
    pub montant: serde_json::Number,
    pub fournisseur: Option<String>,
    pub exercice_comptable: String,
}

impl DocumentUploadRequest {
    /// Validate field constraints and build the domain metadata
    pub fn into_metadata(self, today: NaiveDate) -> DocumentResult<DocumentMetadata> {
        let numero_piece = PieceNumber::new(self.numero_piece)?;

        if let Some(categorie) = &self.categorie_comptable {
            if categorie.chars().count() > 100 {
                return Err(DocumentError::InvalidMetadata(
                    "La catégorie comptable ne doit pas dépasser 100 caractères".to_string(),
                ));
            }
        }

        if self.date_piece > today {
            return Err(DocumentError::InvalidMetadata(
                "La date de la pièce ne peut pas être dans le futur".to_string(),
            ));
        }

        let montant = Amount::parse(&self.montant.to_string())?;

        if let Some(fournisseur) = &self.fournisseur {
            if fournisseur.chars().count() > 255 {
                return Err(DocumentError::InvalidMetadata(
                    "Le nom du fournisseur ne doit pas dépasser 255 caractères".to_string(),
                ));
            }
        }

        let exercice_comptable = FiscalYear::new(self.exercice_comptable)?;

        Ok(DocumentMetadata {
            numero_piece,
            doc_type: self.doc_type,
            categorie_comptable: self.categorie_comptable,
            date_piece: self.date_piece,
            montant,
            fournisseur: self.fournisseur,
            exercice_comptable,
        })
    }
}

// ============================================================================
// Views
// ============================================================================

/// Document as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: Uuid,
    pub numero_piece: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub categorie_comptable: Option<String>,
    pub date_piece: NaiveDate,
    pub montant: Amount,
    pub fournisseur: Option<String>,
    pub nom_fichier_original: String,
    pub type_fichier: String,
    pub taille_fichier: i64,
    pub statut: DocumentStatus,
    pub exercice_comptable: String,
    pub date_creation: DateTime<Utc>,
    pub message: String,
}

impl DocumentView {
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: *document.document_id.as_uuid(),
            numero_piece: document.numero_piece.as_str().to_string(),
            doc_type: document.doc_type,
            categorie_comptable: document.categorie_comptable.clone(),
            date_piece: document.date_piece,
            montant: document.montant,
            fournisseur: document.fournisseur.clone(),
            nom_fichier_original: document.nom_fichier_original.clone(),
            type_fichier: document.type_fichier.clone(),
            taille_fichier: document.taille_fichier,
            statut: document.statut,
            exercice_comptable: document.exercice_comptable.as_str().to_string(),
            date_creation: document.date_creation,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Query string of GET /api/documents/comptable/status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    /// Defaults to EN_ATTENTE when absent
    pub status: Option<DocumentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DocumentUploadRequest {
        serde_json::from_value(serde_json::json!({
            "numeroPiece": "FA-2024-0042",
            "type": "FACTURE_ACHAT",
            "datePiece": "2024-05-10",
            "montant": 1500.50,
            "fournisseur": "Fournisseur SA",
            "exerciceComptable": "2024"
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_request_parses_and_validates() {
        let metadata = request().into_metadata(today()).unwrap();
        assert_eq!(metadata.numero_piece.as_str(), "FA-2024-0042");
        assert_eq!(metadata.doc_type, DocumentType::FactureAchat);
        assert_eq!(metadata.montant.centimes(), 150_050);
        assert_eq!(metadata.exercice_comptable.as_str(), "2024");
    }

    #[test]
    fn test_future_date_rejected() {
        let mut req = request();
        req.date_piece = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(matches!(
            req.into_metadata(today()),
            Err(DocumentError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected_at_parse() {
        let result: Result<DocumentUploadRequest, _> =
            serde_json::from_value(serde_json::json!({
                "numeroPiece": "X",
                "type": "NOTE_DE_FRAIS",
                "datePiece": "2024-05-10",
                "montant": 10,
                "exerciceComptable": "2024"
            }));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_amount_rejected() {
        let mut req = request();
        req.montant = serde_json::Number::from(0);
        assert!(req.into_metadata(today()).is_err());
    }
}
