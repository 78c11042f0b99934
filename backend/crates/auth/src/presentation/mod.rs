//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, Directory};
pub use middleware::{TokenGuardState, require_token};
pub use router::{user_router, user_router_generic};
