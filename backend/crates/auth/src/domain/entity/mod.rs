//! Entities

pub mod menu;
pub mod role;
pub mod session;
pub mod user;

pub use menu::{Menu, MenuNode};
pub use role::Role;
pub use session::{ALL_ROLES_MARKER, SessionPayload, TokenOwner};
pub use user::{User, UserListItem, UserProfile};
