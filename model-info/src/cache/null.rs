//! Cache that stores nothing.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{Cache, CacheError};

/// Always misses; every write and delete reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

#[async_trait]
impl Cache for NullCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn has(&self, _key: &str) -> bool {
        false
    }

    async fn set(&self, _key: &str, _value: Value, _ttl: Option<Duration>) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
