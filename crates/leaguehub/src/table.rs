//! League table computation with tiered caching.

use std::sync::Arc;
use std::time::Duration;

use leaguehub_core::cache::LEAGUE_TABLE_KEY;
use leaguehub_core::league::{table_rows, TableRow};
use leaguehub_core::storage::{Result, TeamRepository};

use crate::cache::TieredCache;

/// Computes standings, consulting every cache tier before the store.
#[derive(Clone)]
pub struct TableService {
    teams: Arc<dyn TeamRepository>,
    cache: TieredCache,
    ttl: Duration,
}

impl TableService {
    pub fn new(teams: Arc<dyn TeamRepository>, cache: TieredCache, ttl: Duration) -> Self {
        Self { teams, cache, ttl }
    }

    /// Returns the current standings.
    ///
    /// Cache tiers are tried in order. On a full miss the table is read from
    /// the store, already ordered by points then goal difference, and written
    /// back to every tier. Only a store failure is returned as an error.
    pub async fn compute(&self) -> Result<Vec<TableRow>> {
        if let Some((tier, rows)) = self.cache.get_table(LEAGUE_TABLE_KEY).await {
            tracing::debug!(tier, rows = rows.len(), "League table served from cache");
            return Ok(rows);
        }

        let teams = self.teams.list_teams_by_standing().await?;
        let rows = table_rows(&teams);

        self.cache.set_table(LEAGUE_TABLE_KEY, &rows, self.ttl).await;
        tracing::debug!(rows = rows.len(), "League table computed from store");

        Ok(rows)
    }

    /// Drops the cached table from every tier.
    pub async fn invalidate(&self) {
        self.cache.delete(LEAGUE_TABLE_KEY).await;
    }

    /// Invalidates, then recomputes so callers see post-write standings.
    pub async fn refresh(&self) -> Result<Vec<TableRow>> {
        self.invalidate().await;
        self.compute().await
    }
}
