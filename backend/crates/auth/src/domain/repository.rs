//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{society::Society, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user (including role grants)
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by email, exact match, roles included
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check whether any user exists (seed guard)
    async fn exists_any(&self) -> AuthResult<bool>;
}

/// Society repository trait
#[trait_variant::make(SocietyRepository: Send)]
pub trait LocalSocietyRepository {
    /// Create a new society
    async fn create(&self, society: &Society) -> AuthResult<()>;

    /// Find society by its ICE identifier
    async fn find_by_ice(&self, ice: &str) -> AuthResult<Option<Society>>;
}
