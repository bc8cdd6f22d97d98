use anyhow::{Context, Result};
use futures::future::BoxFuture;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use super::{CacheEntry, ObjectCache, digest_hex};
use crate::core::ReadmeError;

/// On-disk cache: one JSON file per key.
///
/// File names are the SHA-256 hex of the key, so arbitrary keys (URLs,
/// emails) never reach the filesystem verbatim.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Use `dir` as the cache root. The directory is created on first write.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
        }
    }

    /// The cache root.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", digest_hex(key)))
    }

    async fn read_entry(&self, path: &Path) -> Result<CacheEntry> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read cache entry {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cache entry {}", path.display()))
    }
}

impl ObjectCache for FileCache {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Value>> {
        Box::pin(async move {
            let path = self.entry_path(key);
            if !path.exists() {
                return None;
            }

            match self.read_entry(&path).await {
                Ok(entry) if entry.is_valid() => Some(entry.value),
                Ok(_) => {
                    debug!("Cache entry for {key} expired");
                    fs::remove_file(&path).await.ok();
                    None
                }
                Err(e) => {
                    debug!("Treating unreadable cache entry as a miss: {e:#}");
                    None
                }
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: Value, ttl: Duration) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            fs::create_dir_all(&self.dir).await.map_err(|e| ReadmeError::CacheError {
                operation: "write".to_string(),
                reason: format!("{}: {e}", self.dir.display()),
            })?;

            let content = serde_json::to_string(&CacheEntry::new(value, ttl))?;
            let path = self.entry_path(key);
            fs::write(&path, content).await.map_err(|e| ReadmeError::CacheError {
                operation: "write".to_string(),
                reason: format!("{}: {e}", path.display()),
            })?;

            debug!("Cached {key} for {}s", ttl.as_secs());
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let path = self.entry_path(key);
            if path.exists() {
                fs::remove_file(&path)
                    .await
                    .with_context(|| format!("Failed to remove cache entry {}", path.display()))?;
            }
            Ok(())
        })
    }

    fn clear(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.dir.exists() {
                fs::remove_dir_all(&self.dir).await.map_err(|e| ReadmeError::CacheError {
                    operation: "clear".to_string(),
                    reason: format!("{}: {e}", self.dir.display()),
                })?;
                debug!("Cleared cache at {}", self.dir.display());
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_roundtrip_across_instances() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        FileCache::with_dir(dir.clone())
            .set("profile:github:alice", json!({"n": "Alice"}), Duration::from_secs(60))
            .await
            .unwrap();

        let reopened = FileCache::with_dir(dir);
        assert_eq!(reopened.get("profile:github:alice").await, Some(json!({"n": "Alice"})));
    }

    #[tokio::test]
    async fn test_file_name_is_key_digest() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::with_dir(temp.path().to_path_buf());
        cache.set("k", json!(1), Duration::from_secs(60)).await.unwrap();
        assert!(temp.path().join(format!("{}.json", digest_hex("k"))).exists());
    }

    #[tokio::test]
    async fn test_expired_and_corrupt_entries_are_misses() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::with_dir(temp.path().to_path_buf());

        cache.set("old", json!(1), Duration::ZERO).await.unwrap();
        assert!(cache.get("old").await.is_none());
        assert!(!cache.entry_path("old").exists());

        tokio::fs::write(cache.entry_path("junk"), "not json").await.unwrap();
        assert!(cache.get("junk").await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        let cache = FileCache::with_dir(dir.clone());
        cache.set("a", json!(1), Duration::from_secs(60)).await.unwrap();
        cache.remove("a").await.unwrap();
        cache.remove("a").await.unwrap();
        cache.clear().await.unwrap();
        assert!(!dir.exists());
        cache.clear().await.unwrap();
    }
}
