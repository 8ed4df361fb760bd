//! Authenticate Token Use Case
//!
//! Per-request bearer token verification: cryptographic validity first,
//! then liveness of the referenced identity. Only a token whose subject
//! still resolves to an active user yields a [`Principal`].

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenError, TokenService};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Token-to-principal verification
pub struct AuthenticateTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
}

impl<U> AuthenticateTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config),
        }
    }

    /// Verify a bearer token and build the request principal
    ///
    /// The principal carries the user's CURRENT roles, not the ones
    /// frozen into the token at issuance.
    pub async fn execute(&self, token: &str) -> AuthResult<Principal> {
        let claims = self.tokens.decode(token)?;

        let email = Email::new(claims.sub.as_str())
            .map_err(|_| AuthError::Token(TokenError::UnknownOrInactiveSubject))?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::Token(TokenError::UnknownOrInactiveSubject))?;

        if !user.can_login() {
            return Err(AuthError::Token(TokenError::UnknownOrInactiveSubject));
        }

        Ok(Principal::new(user.email.clone(), user.roles.clone()))
    }
}
