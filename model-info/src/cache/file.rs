//! JSON file cache: keeps entries on disk between process runs.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use super::{Cache, CacheError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: Value,
    /// Unix seconds; `None` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<u64>,
}

impl FileEntry {
    fn is_expired(&self, now: u64) -> bool {
        self.expires_at.map(|t| t <= now).unwrap_or(false)
    }
}

type Entries = HashMap<String, FileEntry>;

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cache persisted as one JSON object in a file.
///
/// The file is read lazily on first use and rewritten whole on every mutation.
/// A missing file is an empty cache; a file that does not decode is
/// [`CacheError::Corrupt`] on writes and a miss on reads.
pub struct JsonFileCache {
    path: PathBuf,
    entries: Mutex<Option<Entries>>,
}

impl JsonFileCache {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<Entries, CacheError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| CacheError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    async fn loaded(&self) -> Result<MutexGuard<'_, Option<Entries>>, CacheError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_file().await?);
        }
        Ok(guard)
    }

    async fn persist(&self, entries: &Entries) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(entries).map_err(|e| CacheError::Other(e.to_string()))?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    async fn mutate<F>(&self, f: F) -> Result<(), CacheError>
    where
        F: FnOnce(&mut Entries) + Send,
    {
        let mut guard = self.loaded().await?;
        let entries = guard.get_or_insert_with(Entries::new);
        let now = unix_now();
        entries.retain(|_, entry| !entry.is_expired(now));
        f(entries);
        self.persist(entries).await
    }
}

#[async_trait]
impl Cache for JsonFileCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let guard = match self.loaded().await {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "model_info cache file unreadable");
                return None;
            }
        };
        let now = unix_now();
        let value = guard
            .as_ref()
            .and_then(|entries| entries.get(key))
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone());
        value
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|d| unix_now() + d.as_secs().max(1));
        let key = key.to_string();
        self.mutate(move |entries| {
            entries.insert(key, FileEntry { value, expires_at });
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        self.mutate(|entries| entries.retain(|key, _| !key.starts_with(prefix)))
            .await
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.mutate(|entries| entries.clear()).await
    }
}
