//! Key/value cache used by the factory to memoize lookups.
//!
//! Values are stored in their serialized JSON form, so any backend that can hold a
//! [`serde_json::Value`] per string key works. [`NullCache`] is the default: it never
//! hits and accepts every write.

mod error;
mod file;
mod in_memory;
mod null;

pub use error::CacheError;
pub use file::JsonFileCache;
pub use in_memory::InMemoryCache;
pub use null::NullCache;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Cache trait for string keys and JSON values with optional TTL.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value by key. `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Whether a live value exists for `key`.
    async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Set a value. `ttl: None` means the entry does not expire.
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn delete_many(&self, keys: &[String]) -> Result<(), CacheError> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(())
    }

    /// Delete every key that starts with `prefix`.
    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError>;

    /// Clear all entries.
    async fn clear(&self) -> Result<(), CacheError>;
}
