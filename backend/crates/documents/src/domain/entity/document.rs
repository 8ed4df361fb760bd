//! Document Entity
//!
//! An accounting document uploaded by a society and reviewed by an
//! accountant. Status moves one way only: EN_ATTENTE to VALIDE (or, in
//! principle, REJETE); a validated document can never be validated again.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{DocumentId, SocietyId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_object::{
    amount::Amount, fiscal_year::FiscalYear, piece_number::PieceNumber,
};
use crate::error::DocumentError;

/// Business type of an accounting document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    FactureAchat,
    FactureVente,
    TicketCaisse,
    ReleveBancaire,
    Autre,
}

impl DocumentType {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use DocumentType::*;
        match self {
            FactureAchat => "FACTURE_ACHAT",
            FactureVente => "FACTURE_VENTE",
            TicketCaisse => "TICKET_CAISSE",
            ReleveBancaire => "RELEVE_BANCAIRE",
            Autre => "AUTRE",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use DocumentType::*;
        match code {
            "FACTURE_ACHAT" => Some(FactureAchat),
            "FACTURE_VENTE" => Some(FactureVente),
            "TICKET_CAISSE" => Some(TicketCaisse),
            "RELEVE_BANCAIRE" => Some(ReleveBancaire),
            "AUTRE" => Some(Autre),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validation status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Initial state, set at creation
    #[default]
    EnAttente,
    /// Terminal: approved by an accountant
    Valide,
    /// Terminal: rejected (representable, no operation produces it yet)
    Rejete,
}

impl DocumentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use DocumentStatus::*;
        match self {
            EnAttente => "EN_ATTENTE",
            Valide => "VALIDE",
            Rejete => "REJETE",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use DocumentStatus::*;
        match code {
            "EN_ATTENTE" => Some(EnAttente),
            "VALIDE" => Some(Valide),
            "REJETE" => Some(Rejete),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated business metadata of an upload
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub numero_piece: PieceNumber,
    pub doc_type: DocumentType,
    pub categorie_comptable: Option<String>,
    pub date_piece: NaiveDate,
    pub montant: Amount,
    pub fournisseur: Option<String>,
    pub exercice_comptable: FiscalYear,
}

/// Stored-file metadata of an upload
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Locator returned by the storage collaborator
    pub chemin_fichier: String,
    pub nom_fichier_original: String,
    pub type_fichier: String,
    pub taille_fichier: i64,
}

/// Document entity
#[derive(Debug, Clone)]
pub struct Document {
    /// Internal UUID identifier
    pub document_id: DocumentId,
    pub numero_piece: PieceNumber,
    pub doc_type: DocumentType,
    pub categorie_comptable: Option<String>,
    pub date_piece: NaiveDate,
    pub montant: Amount,
    pub fournisseur: Option<String>,
    pub exercice_comptable: FiscalYear,
    /// Storage locator
    pub chemin_fichier: String,
    pub nom_fichier_original: String,
    pub type_fichier: String,
    pub taille_fichier: i64,
    pub statut: DocumentStatus,
    /// Accountant's comment, recorded at validation
    pub commentaire_comptable: Option<String>,
    /// Owning society
    pub society_id: SocietyId,
    /// Society user who uploaded the file
    pub uploaded_by: UserId,
    /// Accountant who validated, once validated
    pub validated_by: Option<UserId>,
    pub date_validation: Option<DateTime<Utc>>,
    pub date_creation: DateTime<Utc>,
    pub date_modification: DateTime<Utc>,
}

impl Document {
    /// Create a new document, strictly EN_ATTENTE
    pub fn new(
        metadata: DocumentMetadata,
        file: FileInfo,
        society_id: SocietyId,
        uploaded_by: UserId,
    ) -> Self {
        let now = Utc::now();

        Self {
            document_id: DocumentId::new(),
            numero_piece: metadata.numero_piece,
            doc_type: metadata.doc_type,
            categorie_comptable: metadata.categorie_comptable,
            date_piece: metadata.date_piece,
            montant: metadata.montant,
            fournisseur: metadata.fournisseur,
            exercice_comptable: metadata.exercice_comptable,
            chemin_fichier: file.chemin_fichier,
            nom_fichier_original: file.nom_fichier_original,
            type_fichier: file.type_fichier,
            taille_fichier: file.taille_fichier,
            statut: DocumentStatus::EnAttente,
            commentaire_comptable: None,
            society_id,
            uploaded_by,
            validated_by: None,
            date_validation: None,
            date_creation: now,
            date_modification: now,
        }
    }

    /// Guarded transition to VALIDE
    ///
    /// Validating twice is an error, not a no-op. The persisted form of
    /// this guard is the atomic update in the repository; this entity
    /// method is the in-memory counterpart.
    pub fn validate(
        &mut self,
        validator: UserId,
        comment: Option<String>,
    ) -> Result<(), DocumentError> {
        if self.statut == DocumentStatus::Valide {
            return Err(DocumentError::AlreadyValidated);
        }

        let now = Utc::now();
        self.statut = DocumentStatus::Valide;
        self.validated_by = Some(validator);
        self.date_validation = Some(now);
        if let Some(comment) = comment {
            self.commentaire_comptable = Some(comment);
        }
        self.date_modification = now;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document() -> Document {
        Document::new(
            DocumentMetadata {
                numero_piece: PieceNumber::new("FA-2024-0042").unwrap(),
                doc_type: DocumentType::FactureAchat,
                categorie_comptable: None,
                date_piece: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
                montant: Amount::parse("1500.50").unwrap(),
                fournisseur: Some("Fournisseur SA".to_string()),
                exercice_comptable: FiscalYear::new("2024").unwrap(),
            },
            FileInfo {
                chemin_fichier: "uploads/abc.pdf".to_string(),
                nom_fichier_original: "facture.pdf".to_string(),
                type_fichier: "application/pdf".to_string(),
                taille_fichier: 1024,
            },
            SocietyId::new(),
            UserId::new(),
        )
    }

    #[test]
    fn test_new_document_is_pending() {
        let doc = test_document();
        assert_eq!(doc.statut, DocumentStatus::EnAttente);
        assert!(doc.validated_by.is_none());
        assert!(doc.date_validation.is_none());
    }

    #[test]
    fn test_validate_transitions_once() {
        let mut doc = test_document();
        let validator = UserId::new();

        doc.validate(validator, Some("Conforme".to_string())).unwrap();
        assert_eq!(doc.statut, DocumentStatus::Valide);
        assert!(doc.validated_by.is_some());
        assert!(doc.date_validation.is_some());
        assert_eq!(doc.commentaire_comptable.as_deref(), Some("Conforme"));

        // Second validation is an error, not a no-op
        let err = doc.validate(UserId::new(), None).unwrap_err();
        assert!(matches!(err, DocumentError::AlreadyValidated));
    }

    #[test]
    fn test_validate_without_comment_keeps_none() {
        let mut doc = test_document();
        doc.validate(UserId::new(), None).unwrap();
        assert!(doc.commentaire_comptable.is_none());
    }

    #[test]
    fn test_rejected_document_can_still_be_validated() {
        // Matches the persisted guard: only VALIDE blocks the transition
        let mut doc = test_document();
        doc.statut = DocumentStatus::Rejete;
        assert!(doc.validate(UserId::new(), None).is_ok());
        assert_eq!(doc.statut, DocumentStatus::Valide);
    }

    #[test]
    fn test_status_codes_roundtrip() {
        for status in [
            DocumentStatus::EnAttente,
            DocumentStatus::Valide,
            DocumentStatus::Rejete,
        ] {
            assert_eq!(DocumentStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(DocumentStatus::from_code("UNKNOWN"), None);
    }

    #[test]
    fn test_type_codes_roundtrip() {
        for doc_type in [
            DocumentType::FactureAchat,
            DocumentType::FactureVente,
            DocumentType::TicketCaisse,
            DocumentType::ReleveBancaire,
            DocumentType::Autre,
        ] {
            assert_eq!(DocumentType::from_code(doc_type.code()), Some(doc_type));
        }
    }
}
