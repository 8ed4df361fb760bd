//! Token Service
//!
//! Mints and verifies signed bearer tokens. Tokens are self-contained:
//! `base64url(claims JSON) . base64url(HMAC-SHA256 over the encoded
//! payload)`. No server-side session state exists, so the request tier
//! scales horizontally; the trade-off is that a token cannot be revoked
//! before its expiry.
//!
//! Cryptographic verification lives here. Subject liveness (does the
//! referenced account still exist and is it active?) is the second step,
//! handled by [`crate::application::authenticate::AuthenticateTokenUseCase`].

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, role::Role};

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The string does not parse as a token
    #[error("token is malformed")]
    Malformed,

    /// The signature does not match the payload
    #[error("token signature mismatch")]
    BadSignature,

    /// The validity window has elapsed
    #[error("token has expired")]
    Expired,

    /// The subject no longer resolves to an active user
    #[error("token subject unknown or inactive")]
    UnknownOrInactiveSubject,
}

/// Claims carried inside a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email
    pub sub: String,
    /// Role codes held at issuance
    pub roles: Vec<String>,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Stateless signed-token service
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a signed token for a subject
    ///
    /// The validity window starts now and lasts `AuthConfig::token_ttl`.
    pub fn issue(&self, email: &Email, roles: &[Role]) -> String {
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: email.as_str().to_string(),
            roles: roles.iter().map(|r| r.code().to_string()).collect(),
            iat: now,
            exp: now + self.config.token_ttl_secs(),
        };

        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("claims serialize to JSON"));

        format!("{}.{}", payload, self.sign(&payload))
    }

    /// Cryptographically verify a token and return its claims
    ///
    /// The signature is checked before the payload is even parsed, so a
    /// tampered token never reaches the JSON layer.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::Malformed)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// HMAC-SHA256 signature over the encoded payload
    fn sign(&self, payload_b64: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> TokenService {
        TokenService::new(Arc::new(AuthConfig::with_random_secret()))
    }

    fn email() -> Email {
        Email::new("user1@example.com").unwrap()
    }

    #[test]
    fn test_issue_decode_roundtrip() {
        let service = service();
        let token = service.issue(&email(), &[Role::Society]);

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.sub, "user1@example.com");
        assert_eq!(claims.roles, vec!["ROLE_SOCIETE".to_string()]);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            token_ttl: Duration::ZERO,
            ..AuthConfig::with_random_secret()
        };
        let service = TokenService::new(Arc::new(config));

        let token = service.issue(&email(), &[Role::Society]);
        assert_eq!(service.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let token = service.issue(&email(), &[Role::Society]);

        // Flip one character of the payload
        let mut tampered: Vec<char> = token.chars().collect();
        tampered[0] = if tampered[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        let err = service.decode(&tampered).unwrap_err();
        assert!(matches!(err, TokenError::BadSignature | TokenError::Malformed));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = service().issue(&email(), &[Role::Accountant]);
        let other = service();
        assert_eq!(other.decode(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_rejected_as_malformed() {
        assert_eq!(service().decode("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(service().decode(""), Err(TokenError::Malformed));
        // An empty signature decodes fine but can never match
        assert_eq!(
            service().decode("onlypayloadnosignature."),
            Err(TokenError::BadSignature)
        );
    }
}
