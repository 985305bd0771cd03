//! In-memory cache implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Cache, CacheError};

struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| expires_at <= Instant::now())
            .unwrap_or(false)
    }
}

/// In-memory cache for the lifetime of the process.
///
/// Stores values in a `HashMap` behind a `RwLock`; clones share the same storage.
/// Expired entries are treated as absent and dropped on the next write.
///
/// # Example
///
/// ```rust,ignore
/// use model_info::cache::{Cache, InMemoryCache};
/// use std::time::Duration;
///
/// let cache = InMemoryCache::new();
/// cache.set("key", serde_json::json!("value"), Some(Duration::from_secs(60))).await?;
/// assert_eq!(cache.get("key").await, Some(serde_json::json!("value")));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryCache {
    data: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        self.data
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let data = self.data.read().await;
        data.get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|d| Instant::now() + d);
        let mut data = self.data.write().await;
        data.retain(|_, entry| !entry.is_expired());
        data.insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        self.data
            .write()
            .await
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.data.write().await.clear();
        Ok(())
    }
}
