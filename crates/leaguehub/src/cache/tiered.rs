//! Ordered multi-tier cache for the league table.
//!
//! Tiers are consulted front to back on reads and all written on stores.
//! A failing tier is logged and skipped: reads treat it as a miss, writes
//! carry on with the remaining tiers.

use std::sync::Arc;
use std::time::Duration;

use leaguehub_core::cache::{deserialize_table, serialize_table, Cache, CacheError};
use leaguehub_core::league::TableRow;

#[derive(Clone)]
struct Tier {
    name: &'static str,
    cache: Arc<dyn Cache>,
}

/// Cache lookups across an ordered list of tiers.
#[derive(Clone, Default)]
pub struct TieredCache {
    tiers: Vec<Tier>,
}

impl TieredCache {
    /// Appends a tier consulted after every existing one.
    pub fn with_tier(mut self, name: &'static str, cache: Arc<dyn Cache>) -> Self {
        self.tiers.push(Tier { name, cache });
        self
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name).collect()
    }

    /// Returns the first tier hit that decodes, together with the tier name.
    pub async fn get_table(&self, key: &str) -> Option<(&'static str, Vec<TableRow>)> {
        for tier in &self.tiers {
            match tier.cache.get(key).await {
                Ok(Some(bytes)) => match deserialize_table(&bytes) {
                    Ok(rows) => return Some((tier.name, rows)),
                    Err(e) => {
                        let e = CacheError::from(e);
                        tracing::warn!(tier = tier.name, key, error = %e, "Cache payload unreadable, treating as miss");
                    }
                },
                Ok(None) => {
                    tracing::trace!(tier = tier.name, key, "Cache miss");
                }
                Err(e) => {
                    tracing::warn!(tier = tier.name, key, error = %e, "Cache read failed, treating as miss");
                }
            }
        }
        None
    }

    /// Writes `rows` to every tier. Failures are logged, never returned.
    pub async fn set_table(&self, key: &str, rows: &[TableRow], ttl: Duration) {
        let bytes = match serialize_table(rows) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize table for caching");
                return;
            }
        };

        for tier in &self.tiers {
            if let Err(e) = tier.cache.set(key, &bytes, ttl).await {
                tracing::warn!(tier = tier.name, key, error = %e, "Cache write failed");
            }
        }
    }

    /// Removes `key` from every tier. Failures are logged, never returned.
    pub async fn delete(&self, key: &str) {
        for tier in &self.tiers {
            if let Err(e) = tier.cache.delete(key).await {
                tracing::warn!(tier = tier.name, key, error = %e, "Cache delete failed");
            }
        }
    }
}
