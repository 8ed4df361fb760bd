//! Principal Entity
//!
//! The authenticated identity attached to a request. Built fresh per
//! request from a verified token (or at login) and carried in the
//! request's extensions; never persisted, never shared across requests.

use crate::domain::value_object::{email::Email, role::Role};

/// Authenticated identity + role set for one request
#[derive(Debug, Clone)]
pub struct Principal {
    /// Login identifier of the authenticated user
    pub email: Email,
    /// Roles held at verification time
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(email: Email, roles: Vec<Role>) -> Self {
        Self { email, roles }
    }

    /// Role containment test used by the authorization guard
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let principal = Principal::new(
            Email::new("comptable1@example.com").unwrap(),
            vec![Role::Accountant],
        );
        assert!(principal.has_role(Role::Accountant));
        assert!(!principal.has_role(Role::Society));
    }

    #[test]
    fn test_empty_roles_hold_nothing() {
        let principal = Principal::new(Email::new("user1@example.com").unwrap(), vec![]);
        assert!(!principal.has_role(Role::Society));
        assert!(!principal.has_role(Role::Accountant));
    }
}
