//! User Entity
//!
//! An account that can log in: a society member who uploads documents
//! or an accountant who validates them.

use chrono::{DateTime, Utc};
use kernel::id::{SocietyId, UserId};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, role::Role};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email (unique, used as the login identifier)
    pub email: Email,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// Display name
    pub full_name: String,
    /// Owning society, if any (accountants have none)
    pub society_id: Option<SocietyId>,
    /// Whether the account may log in
    pub active: bool,
    /// Granted roles (many-to-many)
    pub roles: Vec<Role>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with no roles
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        full_name: impl Into<String>,
        society_id: Option<SocietyId>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            full_name: full_name.into(),
            society_id,
            active: true,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Grant a role (no-op if already granted)
    pub fn grant_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
            self.updated_at = Utc::now();
        }
    }

    /// Check whether the user holds a role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if the user can log in
    pub fn can_login(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn test_user() -> User {
        let hash = ClearTextPassword::new("MySecure#Pass2024".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        User::new(
            Email::new("user1@example.com").unwrap(),
            hash,
            "Ahmed El Houcine",
            None,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();
        assert!(user.active);
        assert!(user.roles.is_empty());
        assert!(user.society_id.is_none());
        assert!(user.can_login());
    }

    #[test]
    fn test_grant_role_is_idempotent() {
        let mut user = test_user();
        user.grant_role(Role::Society);
        user.grant_role(Role::Society);
        assert_eq!(user.roles.len(), 1);
        assert!(user.has_role(Role::Society));
        assert!(!user.has_role(Role::Accountant));
    }
}
