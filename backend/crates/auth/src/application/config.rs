//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Prefix of session cache keys (`<namespace>:<token>`)
    pub session_namespace: String,
    /// Session lifetime; fixed at login, never extended by access
    pub session_ttl: Duration,
    /// Password written by save-or-update
    pub default_password: String,
    /// Request header carrying the session token
    pub token_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_namespace: "test_user_info".to_string(),
            session_ttl: Duration::from_secs(24 * 3600), // 1 day
            default_password: "Aa123456".to_string(),
            token_header: "token".to_string(),
        }
    }
}

impl AuthConfig {
    /// Fully-qualified cache key for a token
    pub fn session_key(&self, token: &str) -> String {
        format!("{}:{}", self.session_namespace, token)
    }

    /// Get session TTL in seconds
    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_secs(), 86_400);
        assert_eq!(config.token_header, "token");
    }

    #[test]
    fn test_session_key_is_namespaced() {
        let config = AuthConfig::default();
        assert_eq!(config.session_key("abc"), "test_user_info:abc");
    }
}
