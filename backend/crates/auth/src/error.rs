//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::cache::CacheError;
use platform::cipher::CipherError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username and password both absent
    #[error("Username and password are required")]
    MissingCredentials,

    /// Unknown user or wrong password; the two are deliberately indistinguishable
    #[error("Wrong username or password")]
    InvalidCredentials,

    /// Registration with a username that is already taken
    #[error("Username is already registered")]
    DuplicateUser,

    /// Admin create with a username that is already taken
    #[error("Username already exists")]
    UsernameTaken,

    /// Token absent from the session store
    #[error("Token has expired, please sign in again")]
    TokenExpired,

    #[error("User id is required")]
    MissingUserId,

    #[error("The new password and its confirmation do not match")]
    PasswordConfirmationMismatch,

    #[error("The new password must differ from the current password")]
    NewPasswordEqualsOld,

    #[error("The old password is incorrect")]
    OldPasswordIncorrect,

    /// Registration failure of any kind other than a duplicate username
    #[error("{0}")]
    ValidationFailure(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Password cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("Session payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::DuplicateUser => "DUPLICATE_USER",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::MissingUserId => "MISSING_USER_ID",
            AuthError::PasswordConfirmationMismatch => "PASSWORD_CONFIRMATION_MISMATCH",
            AuthError::NewPasswordEqualsOld => "NEW_PASSWORD_EQUALS_OLD",
            AuthError::OldPasswordIncorrect => "OLD_PASSWORD_INCORRECT",
            AuthError::ValidationFailure(_) => "VALIDATION_FAILURE",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Cache(_) => "CACHE_UNAVAILABLE",
            AuthError::Cipher(_) | AuthError::Serialization(_) | AuthError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials
            | AuthError::MissingUserId
            | AuthError::ValidationFailure(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::DuplicateUser | AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::PasswordConfirmationMismatch
            | AuthError::NewPasswordEqualsOld
            | AuthError::OldPasswordIncorrect => ErrorKind::UnprocessableEntity,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Cache(_) => ErrorKind::ServiceUnavailable,
            AuthError::Cipher(_) | AuthError::Serialization(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        let message = if self.kind().is_server_error() {
            self.kind().as_str().to_string()
        } else {
            self.to_string()
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Cache(e) => {
                tracing::error!(error = %e, "Session cache error");
            }
            AuthError::Cipher(e) => {
                tracing::error!(error = %e, "Password cipher error");
            }
            AuthError::Serialization(e) => {
                tracing::error!(error = %e, "Session payload error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::ValidationFailure(err.message().to_string())
        }
    }
}

/// Best-effort operations: failures are logged, never returned
pub trait BestEffort<T> {
    fn best_effort(self, operation: &'static str) -> Option<T>;
}

impl<T> BestEffort<T> for AuthResult<T> {
    fn best_effort(self, operation: &'static str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(operation, error = %e, "Best-effort operation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_errors_share_status() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingCredentials.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_app_error_keeps_code() {
        let app = AuthError::UsernameTaken.to_app_error();
        assert_eq!(app.code(), "USERNAME_TAKEN");
        assert_eq!(app.status_code(), 409);
        assert_eq!(app.message(), "Username already exists");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let app = AuthError::Internal("menu 7 has parent 7".to_string()).to_app_error();
        assert_eq!(app.code(), "INTERNAL_ERROR");
        assert!(!app.message().contains("menu 7"));
    }

    #[test]
    fn test_client_app_error_becomes_validation_failure() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::ValidationFailure(ref m) if m == "Invalid email format"));
    }

    #[test]
    fn test_best_effort_swallows() {
        let failed: AuthResult<()> = Err(AuthError::Cache(CacheError::Unavailable("down".into())));
        assert_eq!(failed.best_effort("test"), None);
        let ok: AuthResult<u8> = Ok(1);
        assert_eq!(ok.best_effort("test"), Some(1));
    }
}
