//! Login Use Case
//!
//! Authenticates a credential pair and issues a signed bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialVerifier;
use crate::application::token::TokenService;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Login input
pub struct LoginInput {
    /// Email (login identifier)
    pub email: String,
    /// Clear-text password
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    /// Authenticated email, echoed back
    pub email: String,
    /// Role codes held by the user
    pub roles: Vec<String>,
    /// The authenticated context, for callers that continue handling the
    /// same request after login
    pub principal: Principal,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    verifier: CredentialVerifier<U>,
    tokens: TokenService,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            verifier: CredentialVerifier::new(user_repo, config.clone()),
            tokens: TokenService::new(config),
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self.verifier.verify(&input.email, input.password).await?;

        let token = self.tokens.issue(&user.email, &user.roles);

        tracing::info!(email = %user.email, "User signed in");

        Ok(LoginOutput {
            token,
            email: user.email.to_string(),
            roles: user.roles.iter().map(|r| r.code().to_string()).collect(),
            principal: Principal::new(user.email.clone(), user.roles.clone()),
        })
    }
}
