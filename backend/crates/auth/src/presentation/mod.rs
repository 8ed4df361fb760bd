//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    Access, AuthMiddlewareState, RouteRules, authenticate_request, authorize_request,
};
pub use router::{auth_router, auth_router_generic};
