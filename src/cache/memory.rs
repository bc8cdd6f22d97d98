use anyhow::Result;
use dashmap::DashMap;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::{CacheEntry, ObjectCache};

/// Process-local cache backed by a `DashMap`.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ObjectCache for MemoryCache {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<Value>> {
        Box::pin(async move {
            let live = self.entries.get(key).filter(|e| e.is_valid()).map(|e| e.value.clone());
            if live.is_none() {
                self.entries.remove_if(key, |_, e| !e.is_valid());
            }
            live
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: Value, ttl: Duration) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.entries.insert(key.to_string(), CacheEntry::new(value, ttl));
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.entries.remove(key);
            Ok(())
        })
    }

    fn clear(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.entries.clear();
            Ok(())
        })
    }
}
