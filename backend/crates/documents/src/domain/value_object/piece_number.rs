//! Piece Number Value Object
//!
//! Business reference of an accounting document (numéro de pièce).

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Maximum length of a piece number
const PIECE_NUMBER_MAX_LENGTH: usize = 100;

/// Piece number (numéro de pièce)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceNumber(String);

impl PieceNumber {
    /// Create a piece number with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into().trim().to_string();

        if raw.is_empty() {
            return Err(AppError::bad_request("Le numéro de pièce est obligatoire"));
        }

        if raw.chars().count() > PIECE_NUMBER_MAX_LENGTH {
            return Err(AppError::bad_request(
                "Le numéro de pièce ne doit pas dépasser 100 caractères",
            ));
        }

        Ok(Self(raw))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_piece_numbers() {
        assert!(PieceNumber::new("FA-2024-0042").is_ok());
        assert!(PieceNumber::new("1").is_ok());
    }

    #[test]
    fn test_invalid_piece_numbers() {
        assert!(PieceNumber::new("").is_err());
        assert!(PieceNumber::new("   ").is_err());
        assert!(PieceNumber::new("x".repeat(101)).is_err());
    }

    #[test]
    fn test_max_length_boundary() {
        assert!(PieceNumber::new("x".repeat(100)).is_ok());
    }
}
