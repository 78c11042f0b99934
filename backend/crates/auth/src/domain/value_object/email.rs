//! Email Value Object
//!
//! Contact address on a user profile. Format check only.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let email = raw.as_ref().trim().to_lowercase();

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace) =>
            {
                Ok(Self(email))
            }
            _ => Err(AppError::bad_request("Invalid email format")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("qa@example.com").is_ok());
        assert!(Email::new("qa@intranet").is_ok());
        assert_eq!(Email::new(" QA@Example.COM ").unwrap().as_str(), "qa@example.com");
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("qa.example.com").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("qa@").is_err());
        assert!(Email::new("qa@@example.com").is_err());
        assert!(Email::new("q a@example.com").is_err());
    }
}
