use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to a user
///
/// Exactly two roles exist: `Society` tenants upload documents,
/// `Accountant` reviewers validate them. Wire codes keep the legacy
/// authority names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum Role {
    Society = 0,
    Accountant = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Society => "ROLE_SOCIETE",
            Accountant => "ROLE_COMPTABLE",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use Role::*;
        match id {
            0 => Some(Society),
            1 => Some(Accountant),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "ROLE_SOCIETE" => Some(Society),
            "ROLE_COMPTABLE" => Some(Accountant),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::Society));
        assert_eq!(Role::from_id(1), Some(Role::Accountant));
        assert_eq!(Role::from_id(7), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("ROLE_SOCIETE"), Some(Role::Society));
        assert_eq!(Role::from_code("ROLE_COMPTABLE"), Some(Role::Accountant));
        assert_eq!(Role::from_code("ROLE_ADMIN"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Society.to_string(), "ROLE_SOCIETE");
        assert_eq!(Role::Accountant.to_string(), "ROLE_COMPTABLE");
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Society, Role::Accountant] {
            assert_eq!(Role::from_id(role.id()), Some(role));
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
    }
}
