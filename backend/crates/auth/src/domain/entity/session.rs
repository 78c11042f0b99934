//! Session Entity
//!
//! The artifact written to the session store on login and read back on
//! every authenticated request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{menu::MenuNode, user::UserProfile};
use crate::domain::value_object::UserId;

/// Literal placed in `SessionPayload::roles` regardless of role data
pub const ALL_ROLES_MARKER: &str = "all";

/// Cached login result, also the login response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    #[serde(flatten)]
    pub user: UserProfile,
    pub token: String,
    pub roles: Vec<String>,
    pub menus: Vec<MenuNode>,
    pub login_at: DateTime<Utc>,
}

impl SessionPayload {
    pub fn new(user: UserProfile, token: String, menus: Vec<MenuNode>) -> Self {
        Self {
            user,
            token,
            roles: vec![ALL_ROLES_MARKER.to_string()],
            menus,
            login_at: Utc::now(),
        }
    }

    pub fn owner(&self) -> TokenOwner {
        TokenOwner {
            id: Some(self.user.id),
            username: Some(self.user.username.clone()),
        }
    }
}

/// The only session fields re-exposed by token checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOwner {
    pub id: Option<UserId>,
    pub username: Option<String>,
}
