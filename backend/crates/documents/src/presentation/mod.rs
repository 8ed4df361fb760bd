//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DocumentAppState;
pub use router::{documents_router, documents_router_generic};
