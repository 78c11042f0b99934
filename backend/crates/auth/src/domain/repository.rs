//! Repository Traits
//!
//! Interfaces to the user directory and the session cache. Implementations
//! are in the infrastructure layer.

use std::collections::BTreeSet;
use std::time::Duration;

use kernel::pagination::{Page, PageQuery};

use crate::domain::entity::{Menu, Role, SessionPayload, User};
use crate::domain::value_object::{MenuId, RoleId, UserId};
use crate::error::AuthResult;

/// Filters for the user listing
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Substring match on username
    pub username: Option<String>,
    /// Substring match on nickname
    pub nickname: Option<String>,
    pub page: PageQuery,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Exact match on the login name
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Persist a new user and return it with its assigned id
    async fn insert(&self, user: User) -> AuthResult<User>;

    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Remove a user; returns whether it existed
    async fn delete(&self, user_id: UserId) -> AuthResult<bool>;

    async fn list(&self, query: &UserQuery) -> AuthResult<Page<User>>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Roles matching `role_ids`; unknown ids are simply absent from the result
    async fn find_by_ids(&self, role_ids: &[RoleId]) -> AuthResult<Vec<Role>>;
}

/// Menu repository trait
#[trait_variant::make(MenuRepository: Send)]
pub trait LocalMenuRepository {
    /// `parent_id` of every known menu in `menu_ids`
    async fn find_parent_ids(&self, menu_ids: &BTreeSet<MenuId>) -> AuthResult<Vec<MenuId>>;

    /// Menus in `menu_ids`, in storage order
    async fn find_by_ids(&self, menu_ids: &BTreeSet<MenuId>) -> AuthResult<Vec<Menu>>;
}

/// Session store trait
///
/// Token → session payload with absolute expiry. Each operation is atomic
/// for its token; a session is either fully present or absent.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store the payload, replacing any prior value for the token
    async fn put(&self, token: &str, payload: &SessionPayload, ttl: Duration) -> AuthResult<()>;

    async fn get(&self, token: &str) -> AuthResult<Option<SessionPayload>>;

    /// Remove the session; absent tokens are a no-op
    async fn delete(&self, token: &str) -> AuthResult<()>;
}
