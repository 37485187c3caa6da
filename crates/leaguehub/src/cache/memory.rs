//! In-process TTL cache.
//!
//! Entries expire lazily: an expired entry reads as absent but stays in the
//! map until it is overwritten or deleted. There is no capacity bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use leaguehub_core::cache::{Cache, Result};

/// A single cache entry with its expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// An entry is live up to and including its expiry instant.
    fn is_live_at(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}

/// Generic in-memory cache with per-entry TTL.
///
/// Readers share the lock and writers exclude each other, so any number of
/// tasks may use one instance concurrently. Cloning shares the same store.
#[derive(Debug)]
pub struct TtlCache<V> {
    store: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let mut store = self.store.write().await;
        store.insert(key.into(), CacheEntry::new(value, ttl));
    }

    pub async fn remove(&self, key: &str) {
        let mut store = self.store.write().await;
        store.remove(key);
    }

    /// Number of stored entries, expired ones included.
    #[cfg(test)]
    pub async fn entry_count(&self) -> usize {
        self.store.read().await.len()
    }
}

impl<V: Clone> TtlCache<V> {
    /// Returns the value if present and not yet expired.
    pub async fn lookup(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let store = self.store.read().await;
        store
            .get(key)
            .filter(|entry| entry.is_live_at(now))
            .map(|entry| entry.value.clone())
    }
}

#[async_trait]
impl Cache for TtlCache<Vec<u8>> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lookup(key).await)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.insert(key, value.to_vec(), ttl).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.remove(key).await;
        Ok(())
    }
}
