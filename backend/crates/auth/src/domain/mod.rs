//! Domain Layer
//!
//! Contains entities, value objects, repository traits and pure services.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{Menu, MenuNode, Role, SessionPayload, TokenOwner, User};
pub use repository::{MenuRepository, RoleRepository, SessionStore, UserQuery, UserRepository};
