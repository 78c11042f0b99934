//! User Name Value Object
//!
//! ログイン名（一意）。登録時のみ検証し、ログイン時は入力値のまま検索する。
//!
//! ## 不変条件
//! - 前後の空白は除去
//! - 長さ: 1〜64文字
//! - 空白・制御文字を含まない

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        let len = name.chars().count();
        if len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, len
            )));
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request(
                "Username cannot contain whitespace or control characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UserName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trimmed() {
        let name = UserName::new("  admin ").unwrap();
        assert_eq!(name.as_str(), "admin");
    }

    #[test]
    fn test_user_name_allows_non_ascii() {
        assert!(UserName::new("测试用户").is_ok());
    }

    #[test]
    fn test_user_name_invalid() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("   ").is_err());
        assert!(UserName::new("two words").is_err());
        assert!(UserName::new("tab\tname").is_err());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }
}
