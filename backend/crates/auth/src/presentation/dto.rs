//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use kernel::pagination::PageQuery;

use crate::application::{ChangePasswordInput, LoginInput, RegisterInput, SaveUserInput};
use crate::domain::repository::UserQuery;
use crate::domain::value_object::{RoleId, UserId};

// ============================================================================
// Login
// ============================================================================

/// Login request; missing fields are judged by the service, not by serde
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub remarks: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            nickname: req.nickname,
            email: req.email,
            remarks: req.remarks,
        }
    }
}

// ============================================================================
// User Admin
// ============================================================================

/// User listing request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub username: Option<String>,
    pub nickname: Option<String>,
}

impl From<ListUsersRequest> for UserQuery {
    fn from(req: ListUsersRequest) -> Self {
        let defaults = PageQuery::default();
        Self {
            username: req.username,
            nickname: req.nickname,
            page: PageQuery::new(
                req.page.unwrap_or(defaults.page),
                req.page_size.unwrap_or(defaults.page_size),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserRequest {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub remarks: Option<String>,
    pub roles: Option<Vec<RoleId>>,
}

impl From<SaveUserRequest> for SaveUserInput {
    fn from(req: SaveUserRequest) -> Self {
        Self {
            id: req.id,
            username: req.username,
            nickname: req.nickname,
            email: req.email,
            remarks: req.remarks,
            roles: req.roles,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    pub id: UserId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub old_pwd: String,
    #[serde(default)]
    pub new_pwd: String,
    /// Confirmation of `new_pwd`
    #[serde(default)]
    pub re_new_pwd: String,
}

impl From<ChangePasswordRequest> for ChangePasswordInput {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            user_id: req.user_id,
            old_pwd: req.old_pwd,
            new_pwd: req.new_pwd,
            confirm_pwd: req.re_new_pwd,
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// Acknowledgement body for operations with nothing to return
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_field_names() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"userId": 4, "oldPwd": "a", "newPwd": "b", "reNewPwd": "b"}"#,
        )
        .unwrap();
        let input = ChangePasswordInput::from(req);
        assert_eq!(input.user_id, Some(UserId::new(4)));
        assert_eq!(input.confirm_pwd, "b");
    }

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn test_list_request_defaults() {
        let query = UserQuery::from(ListUsersRequest::default());
        assert_eq!(query.page, PageQuery::default());

        let req: ListUsersRequest = serde_json::from_str(r#"{"page": 2, "pageSize": 500}"#).unwrap();
        let query = UserQuery::from(req);
        assert_eq!(query.page.page, 2);
        assert_eq!(query.page.page_size, kernel::pagination::MAX_PAGE_SIZE);
    }
}
