//! User Auth Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, menu-tree rules
//! - `application/` - Use cases and application services
//! - `infra/` - In-memory directory and cache-backed session store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Login/logout with opaque session tokens held in a TTL cache
//! - Role → menu resolution and menu-tree assembly at login
//! - Registration, password change, admin create/update/delete, listing
//!
//! ## Security Model
//! - Passwords are stored through a reversible cipher (AES-256-GCM)
//! - Unknown user and wrong password produce the same error
//! - Sessions expire a fixed time after login

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{CacheSessionStore, MemoryDirectory};
pub use presentation::router::{user_router, user_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
