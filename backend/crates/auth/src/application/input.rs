//! Input normalization shared by the registration and user-admin paths.

use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Trim; blank becomes `None`
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional email; blank becomes `None`, malformed is an error
pub fn normalize_email(value: Option<String>) -> AuthResult<Option<Email>> {
    normalize_text(value)
        .map(|raw| Email::new(raw).map_err(AuthError::from))
        .transpose()
}

pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.is_empty() {
        return Err(AuthError::ValidationFailure("Password is required".to_string()));
    }
    let len = password.chars().count();
    if len > PASSWORD_MAX_LENGTH {
        return Err(AuthError::ValidationFailure(format!(
            "Password must be at most {PASSWORD_MAX_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  QA  ".into())).as_deref(), Some("QA"));
        assert_eq!(normalize_text(Some("   ".into())), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_normalize_email() {
        assert!(normalize_email(Some("".into())).unwrap().is_none());
        assert!(normalize_email(Some("qa@example.com".into())).unwrap().is_some());
        assert!(matches!(
            normalize_email(Some("nope".into())),
            Err(AuthError::ValidationFailure(_))
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Aa123456").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(PASSWORD_MAX_LENGTH + 1)).is_err());
    }
}
