//! Amount Value Object
//!
//! A strictly positive monetary amount with at most 13 integer digits
//! and 2 fraction digits, stored internally as centimes (i64).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum integer digits before the decimal separator
const MAX_INTEGER_DIGITS: usize = 13;

/// Maximum fraction digits after the decimal separator
const MAX_FRACTION_DIGITS: usize = 2;

/// Monetary amount in centimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Parse a decimal string such as `"1500.50"` with validation
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(AppError::bad_request("Le montant est obligatoire"));
        }

        if raw.starts_with('-') {
            return Err(AppError::bad_request("Le montant doit être supérieur à 0"));
        }

        let (integer_part, fraction_part) = match raw.split_once('.') {
            Some((i, f)) => (i, f),
            None => (raw, ""),
        };

        if integer_part.is_empty()
            || !integer_part.chars().all(|c| c.is_ascii_digit())
            || !fraction_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::bad_request("Le montant est invalide"));
        }

        if integer_part.len() > MAX_INTEGER_DIGITS || fraction_part.len() > MAX_FRACTION_DIGITS {
            return Err(AppError::bad_request(
                "Le montant doit avoir au maximum 13 chiffres avant la virgule et 2 après",
            ));
        }

        let integer: i64 = integer_part
            .parse()
            .map_err(|_| AppError::bad_request("Le montant est invalide"))?;

        let fraction: i64 = if fraction_part.is_empty() {
            0
        } else {
            // "5" means 50 centimes, "50" means 50 centimes
            let parsed: i64 = fraction_part
                .parse()
                .map_err(|_| AppError::bad_request("Le montant est invalide"))?;
            if fraction_part.len() == 1 { parsed * 10 } else { parsed }
        };

        let centimes = integer * 100 + fraction;

        if centimes <= 0 {
            return Err(AppError::bad_request("Le montant doit être supérieur à 0"));
        }

        Ok(Self(centimes))
    }

    /// Create from database value (assumed already validated)
    pub fn from_centimes(centimes: i64) -> Self {
        Self(centimes)
    }

    /// Amount in centimes, for database storage
    pub fn centimes(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Serialized as a JSON number (e.g. `1500.5`)
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}
