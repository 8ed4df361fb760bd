//! Society Entity
//!
//! A tenant organization. Societies own documents and affiliate the
//! users who upload them.

use chrono::{DateTime, Utc};
use kernel::id::SocietyId;

use crate::domain::value_object::email::Email;

/// Society entity
#[derive(Debug, Clone)]
pub struct Society {
    /// Internal UUID identifier
    pub society_id: SocietyId,
    /// Legal name (raison sociale)
    pub legal_name: String,
    /// ICE identifier (unique)
    pub ice: String,
    /// Postal address
    pub address: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Contact email (unique)
    pub contact_email: Email,
    /// Whether the society is active
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Society {
    /// Create a new active society
    pub fn new(
        legal_name: impl Into<String>,
        ice: impl Into<String>,
        address: Option<String>,
        phone: Option<String>,
        contact_email: Email,
    ) -> Self {
        let now = Utc::now();

        Self {
            society_id: SocietyId::new(),
            legal_name: legal_name.into(),
            ice: ice.into(),
            address,
            phone,
            contact_email,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_society() {
        let society = Society::new(
            "Al Amane",
            "ICE123456",
            Some("Casablanca, Maroc".to_string()),
            Some("0522123456".to_string()),
            Email::new("contact@al-amane.ma").unwrap(),
        );
        assert!(society.active);
        assert_eq!(society.ice, "ICE123456");
    }
}
