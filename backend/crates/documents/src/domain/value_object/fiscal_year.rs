//! Fiscal Year Value Object
//!
//! The accounting year a document belongs to: exactly four digits.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Fiscal year (exercice comptable), e.g. `"2024"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiscalYear(String);

impl FiscalYear {
    /// Create a fiscal year with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into().trim().to_string();

        if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request(
                "L'exercice comptable doit être une année à 4 chiffres",
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

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_years() {
        assert!(FiscalYear::new("2024").is_ok());
        assert!(FiscalYear::new("1999").is_ok());
        assert!(FiscalYear::new(" 2024 ").is_ok());
    }

    #[test]
    fn test_invalid_years() {
        assert!(FiscalYear::new("").is_err());
        assert!(FiscalYear::new("24").is_err());
        assert!(FiscalYear::new("20245").is_err());
        assert!(FiscalYear::new("20a4").is_err());
    }
}
