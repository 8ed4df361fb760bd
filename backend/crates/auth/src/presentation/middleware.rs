//! Auth Middleware
//!
//! Two request interceptors, applied in order:
//!
//! 1. [`authenticate_request`] — reads the `Authorization` header and, when
//!    a bearer token verifies, attaches a [`Principal`] to the request
//!    extensions. It never rejects: a missing, malformed, expired or
//!    tampered token is equivalent to "no token" at this layer.
//! 2. [`authorize_request`] — evaluates the ordered [`RouteRules`] prefix
//!    table and rejects requests whose principal does not satisfy the
//!    matched requirement. Unauthenticated and wrong-role rejections are
//!    distinct failures (401 vs 403).
//!
//! The login route lives under the public prefix and is fully handled by
//! its own handler; it never falls through to token verification.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateTokenUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::role::Role;
use crate::error::AuthError;

/// Bearer scheme prefix in the Authorization header
const BEARER_PREFIX: &str = "Bearer ";

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that attaches a verified [`Principal`] to the request
///
/// Verification failures are swallowed here; rejection is the guard's
/// job, which keeps public routes flowing through untouched.
pub async fn authenticate_request<U>(
    state: AuthMiddlewareState<U>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(|t| t.to_string());

    if let Some(token) = token {
        let use_case = AuthenticateTokenUseCase::new(state.repo.clone(), state.config.clone());

        match use_case.execute(&token).await {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected, continuing unauthenticated");
            }
        }
    }

    next.run(req).await
}

// ============================================================================
// Authorization guard
// ============================================================================

/// Requirement attached to a route prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No principal needed
    Public,
    /// Any authenticated principal
    Authenticated,
    /// Authenticated principal holding the given role
    Role(Role),
}

/// Ordered path-prefix → requirement table
///
/// Evaluated top to bottom, first match governs; unmatched paths fall
/// back to `Authenticated`.
#[derive(Debug, Clone)]
pub struct RouteRules {
    rules: Vec<(&'static str, Access)>,
    fallback: Access,
}

impl RouteRules {
    pub fn new(rules: Vec<(&'static str, Access)>, fallback: Access) -> Self {
        Self { rules, fallback }
    }

    /// The API's route table
    pub fn api_defaults() -> Self {
        Self::new(
            vec![
                ("/api/auth", Access::Public),
                ("/api/documents/comptable", Access::Role(Role::Accountant)),
                ("/api/documents", Access::Authenticated),
            ],
            Access::Authenticated,
        )
    }

    /// Requirement for a request path
    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|(prefix, _)| Self::prefix_matches(prefix, path))
            .map(|(_, access)| *access)
            .unwrap_or(self.fallback)
    }

    /// Segment-aware prefix match: `/api/auth` matches `/api/auth` and
    /// `/api/auth/login` but not `/api/authx`
    fn prefix_matches(prefix: &str, path: &str) -> bool {
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Middleware that enforces the route table
pub async fn authorize_request(
    rules: Arc<RouteRules>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    match rules.access_for(req.uri().path()) {
        Access::Public => {}
        Access::Authenticated => {
            req.extensions()
                .get::<Principal>()
                .ok_or(AuthError::Unauthenticated)?;
        }
        Access::Role(role) => {
            let principal = req
                .extensions()
                .get::<Principal>()
                .ok_or(AuthError::Unauthenticated)?;

            if !principal.has_role(role) {
                tracing::warn!(
                    email = %principal.email,
                    required = %role,
                    path = %req.uri().path(),
                    "Role check failed"
                );
                return Err(AuthError::Forbidden);
            }
        }
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_first_match_governs() {
        let rules = RouteRules::api_defaults();

        assert_eq!(rules.access_for("/api/auth/login"), Access::Public);
        assert_eq!(
            rules.access_for("/api/documents/comptable/status"),
            Access::Role(Role::Accountant)
        );
        assert_eq!(
            rules.access_for("/api/documents/comptable/valider/42"),
            Access::Role(Role::Accountant)
        );
        assert_eq!(rules.access_for("/api/documents"), Access::Authenticated);
        assert_eq!(
            rules.access_for("/api/documents/upload"),
            Access::Authenticated
        );
    }

    #[test]
    fn test_rules_fallback_requires_auth() {
        let rules = RouteRules::api_defaults();
        assert_eq!(rules.access_for("/"), Access::Authenticated);
        assert_eq!(rules.access_for("/api/other"), Access::Authenticated);
    }

    #[test]
    fn test_prefix_matching_is_segment_aware() {
        let rules = RouteRules::api_defaults();
        // A sibling path must not inherit the public prefix
        assert_eq!(rules.access_for("/api/authx"), Access::Authenticated);
        assert_eq!(
            rules.access_for("/api/documents/comptablefake"),
            Access::Authenticated
        );
    }
}
