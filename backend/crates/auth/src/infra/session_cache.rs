//! Cache-backed Session Store
//!
//! Sessions are stored as JSON under `<namespace>:<token>` in any
//! [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use platform::cache::CacheStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::SessionPayload;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

#[derive(Debug, Clone)]
pub struct CacheSessionStore<C>
where
    C: CacheStore + Sync,
{
    cache: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<C> CacheSessionStore<C>
where
    C: CacheStore + Sync,
{
    pub fn new(cache: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self { cache, config }
    }
}

impl<C> SessionStore for CacheSessionStore<C>
where
    C: CacheStore + Sync,
{
    async fn put(&self, token: &str, payload: &SessionPayload, ttl: Duration) -> AuthResult<()> {
        let value = serde_json::to_string(payload)?;
        self.cache
            .set(&self.config.session_key(token), value, ttl)
            .await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> AuthResult<Option<SessionPayload>> {
        let Some(raw) = self.cache.get(&self.config.session_key(token)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn delete(&self, token: &str) -> AuthResult<()> {
        if let Err(e) = self.cache.delete(&self.config.session_key(token)).await {
            tracing::warn!(error = %e, "Session delete failed; treating as absent");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::UserProfile;
    use crate::domain::value_object::UserId;
    use chrono::Utc;
    use platform::cache::{CacheError, MemoryCache};

    fn payload(token: &str) -> SessionPayload {
        let now = Utc::now();
        let profile = UserProfile {
            id: UserId::new(1),
            username: "admin".to_string(),
            nickname: None,
            email: None,
            remarks: None,
            created_at: now,
            updated_at: now,
        };
        SessionPayload::new(profile, token.to_string(), Vec::new())
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let cache = Arc::new(MemoryCache::new());
        let store = CacheSessionStore::new(cache.clone(), Arc::new(AuthConfig::default()));

        let session = payload("t1");
        store.put("t1", &session, Duration::from_secs(60)).await.unwrap();
        assert!(cache.get("test_user_info:t1").await.unwrap().is_some());
        assert_eq!(store.get("t1").await.unwrap(), Some(session));

        store.delete("t1").await.unwrap();
        assert!(store.get("t1").await.unwrap().is_none());
        store.delete("t1").await.unwrap();
    }

    struct DownCache;

    impl CacheStore for DownCache {
        async fn set(&self, _: &str, _: String, _: Duration) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("connection refused".into()))
        }

        async fn get(&self, _: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::Unavailable("connection refused".into()))
        }

        async fn delete(&self, _: &str) -> Result<bool, CacheError> {
            Err(CacheError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_backend_failure_on_delete_is_swallowed() {
        let store = CacheSessionStore::new(Arc::new(DownCache), Arc::new(AuthConfig::default()));
        assert!(store.delete("t1").await.is_ok());
        assert!(store.get("t1").await.is_err());
        assert!(store.put("t1", &payload("t1"), Duration::from_secs(1)).await.is_err());
    }
}
