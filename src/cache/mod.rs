//! Key-value object cache with per-entry time-to-live.
//!
//! Two things are cached: resolved contributor profiles (`profile:<provider>:<id>`)
//! and rendered invocation responses (`render:<sha256>`). Both go through the
//! [`ObjectCache`] contract, which is deliberately small: `get`, `set` with a TTL,
//! `remove` and `clear`. There is no eviction beyond expiry.
//!
//! # Implementations
//!
//! - [`MemoryCache`]: process-local, backed by a `DashMap`. Used in tests and
//!   when the on-disk cache is disabled (`--no-cache`).
//! - [`FileCache`]: one JSON file per key under the cache directory
//!   (`~/.wpreadme/cache/` by default), named by the SHA-256 of the key.
//!
//! # Concurrency
//!
//! No lock is held across calls. Two sessions resolving the same key both
//! write; the last writer wins and both values are equivalent.
//!
//! A read that fails for any reason (missing file, corrupt JSON, expired
//! entry) is reported as a miss, never as an error.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

/// A cached value together with its expiry time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached JSON value.
    pub value: Value,
    /// UTC instant after which the entry is ignored.
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry that expires `ttl` from now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value,
            expires_at,
        }
    }

    /// Whether the entry is still usable.
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Keyed get/set store with TTL expiry.
///
/// Methods return boxed futures so the cache can be shared as
/// `Arc<dyn ObjectCache>` between the contributor resolver and the
/// invocation layer.
pub trait ObjectCache: Send + Sync {
    /// Fetch a live entry; `None` means "not cached", not "does not exist".
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Value>>;

    /// Store `value` under `key` for `ttl`.
    fn set<'a>(&'a self, key: &'a str, value: Value, ttl: Duration) -> BoxFuture<'a, Result<()>>;

    /// Drop a single entry. Removing an absent key is not an error.
    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Drop every entry.
    fn clear(&self) -> BoxFuture<'_, Result<()>>;
}

/// Read a typed value; undecodable entries are treated as misses.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    let value = cache.get(key).await?;
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            debug!("Ignoring undecodable cache entry {key}: {e}");
            None
        }
    }
}

/// Store a typed value.
pub async fn set_json<T: Serialize>(
    cache: &dyn ObjectCache,
    key: &str,
    value: &T,
    ttl: Duration,
) -> Result<()> {
    let value = serde_json::to_value(value)?;
    cache.set(key, value, ttl).await
}

/// Hex SHA-256 of `input`, used for file names and request fingerprints.
pub fn digest_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_validity() {
        let entry = CacheEntry::new(json!(1), Duration::from_secs(3600));
        assert!(entry.is_valid());

        let entry = CacheEntry::new(json!(1), Duration::ZERO);
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let entry = CacheEntry::new(json!(1), Duration::from_secs(u64::MAX));
        assert!(entry.is_valid());
    }

    #[test]
    fn test_digest_hex_is_stable() {
        assert_eq!(
            digest_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Sample {
            name: String,
        }

        let cache = MemoryCache::new();
        let sample = Sample {
            name: "wp".to_string(),
        };
        set_json(&cache, "k", &sample, Duration::from_secs(60)).await.unwrap();
        assert_eq!(get_json::<Sample>(&cache, "k").await, Some(sample));

        cache.set("bad", json!([1, 2]), Duration::from_secs(60)).await.unwrap();
        assert_eq!(get_json::<Sample>(&cache, "bad").await, None);
    }
}
