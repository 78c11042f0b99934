//! User Entity
//!
//! A row of the user directory. The password column holds ciphertext from
//! the reversible password cipher, never plaintext.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::{Email, IdList, RoleId, RoleMarker, UserId, UserName};

#[derive(Debug, Clone)]
pub struct User {
    /// Zero until the directory assigns a key on insert
    pub id: UserId,
    pub username: UserName,
    /// Encrypted password
    pub password: String,
    pub nickname: Option<String>,
    pub email: Option<Email>,
    pub remarks: Option<String>,
    /// Granted roles, persisted in delimited form
    pub roles: IdList<RoleMarker>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New, not yet persisted user
    pub fn new(username: UserName, encrypted_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(0),
            username,
            password: encrypted_password,
            nickname: None,
            email: None,
            remarks: None,
            roles: IdList::empty(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_zero()
    }

    pub fn set_password(&mut self, encrypted_password: String) {
        self.password = encrypted_password;
        self.updated_at = Utc::now();
    }

    pub fn set_roles(&mut self, roles: &[RoleId]) {
        self.roles = IdList::new(roles.to_vec());
        self.updated_at = Utc::now();
    }

    pub fn role_ids(&self) -> &[RoleId] {
        self.roles.ids()
    }

    /// Public projection, without password or roles
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.to_string(),
            nickname: self.nickname.clone(),
            email: self.email.as_ref().map(|e| e.to_string()),
            remarks: self.remarks.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn list_item(&self) -> UserListItem {
        UserListItem {
            profile: self.profile(),
            roles: self.role_ids().to_vec(),
        }
    }
}

/// User fields safe to hand to clients and to cache in a session
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the user listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub roles: Vec<RoleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        let mut user = User::new(UserName::new("tester").unwrap(), "cipher".to_string());
        user.id = UserId::new(3);
        user.set_roles(&[RoleId::new(1), RoleId::new(2)]);
        user
    }

    #[test]
    fn test_new_user_is_unpersisted() {
        let user = User::new(UserName::new("tester").unwrap(), "cipher".to_string());
        assert!(!user.is_persisted());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_roles_persist_delimited() {
        assert_eq!(sample().roles.join(), "1,2");
    }

    #[test]
    fn test_profile_never_exposes_password() {
        let json = serde_json::to_value(sample().profile()).unwrap();
        assert_eq!(json["username"], "tester");
        assert_eq!(json["id"], 3);
        assert!(json.get("password").is_none());
        assert!(json.get("roles").is_none());
    }

    #[test]
    fn test_list_item_carries_role_ids() {
        let json = serde_json::to_value(sample().list_item()).unwrap();
        assert_eq!(json["roles"], serde_json::json!([1, 2]));
        assert!(json.get("password").is_none());
    }
}
