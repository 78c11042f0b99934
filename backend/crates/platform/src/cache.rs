//! TTL Key/Value Cache
//!
//! Common cache abstraction plus an in-process implementation.
//! Values are opaque strings; callers own serialization and key namespacing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Backend could not be reached or refused the command
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Trait for cache storage backends
///
/// Each call is atomic per key: a reader observes either the previous or
/// the new value, never a partially written one.
#[trait_variant::make(CacheStore: Send)]
pub trait LocalCacheStore {
    /// Store `value` under `key`, replacing any prior value, expiring after `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Get a live value
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Remove `key`; returns whether a live value was present
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    /// `None` when `now + ttl` overflows the clock
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// In-process cache
///
/// Expired entries read as absent immediately and are physically removed
/// by [`MemoryCache::purge_expired`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl CacheStore for MemoryCache {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheStore, Duration, MemoryCache};

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let cache = MemoryCache::new();
        cache.set("k", "one".to_string(), DAY).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("one"));

        cache.set("k", "two".to_string(), DAY).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new();
        cache
            .set("k", "v".to_string(), Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let cache = MemoryCache::new();
        assert!(!cache.delete("missing").await.unwrap());

        cache.set("k", "v".to_string(), DAY).await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_huge_ttl_never_expires() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), Duration::MAX).await.unwrap();
        assert_eq!(cache.purge_expired().await, 0);
        assert!(cache.get("k").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_never_tear_values() {
        let cache = MemoryCache::new();
        let a = "a".repeat(4096);
        let b = "b".repeat(4096);

        let mut handles = Vec::new();
        for i in 0..32 {
            let cache = cache.clone();
            let value = if i % 2 == 0 { a.clone() } else { b.clone() };
            handles.push(tokio::spawn(async move {
                cache.set("shared", value, DAY).await.unwrap();
            }));
        }
        for _ in 0..32 {
            let cache = cache.clone();
            let (a, b) = (a.clone(), b.clone());
            handles.push(tokio::spawn(async move {
                if let Some(seen) = cache.get("shared").await.unwrap() {
                    assert!(seen == a || seen == b);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
