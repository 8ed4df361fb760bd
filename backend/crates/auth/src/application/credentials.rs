//! Credential Verifier
//!
//! Checks a submitted email/password pair against the user store.
//!
//! The three failure causes (unknown user, disabled account, wrong
//! password) stay distinct here for logging; the presentation layer
//! collapses them into one client-facing response.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Email/password verification against stored Argon2 hashes
pub struct CredentialVerifier<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CredentialVerifier<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Verify a credential pair and return the matching user
    ///
    /// Lookup is a case-sensitive exact match on the email. The password
    /// comparison is a salted Argon2id verify (constant-time), never a
    /// plaintext equality.
    pub async fn verify(&self, email: &str, password: String) -> AuthResult<User> {
        let email = Email::new(email).map_err(|_| AuthError::UnknownUser)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        if !user.can_login() {
            return Err(AuthError::Inactive);
        }

        let password =
            ClearTextPassword::new(password).map_err(|_| AuthError::BadCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::BadCredentials);
        }

        Ok(user)
    }
}
