//! Shared application state.
//!
//! Everything handlers need is built once in `main` and injected here;
//! there are no process-wide singletons.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use leaguehub_auth::{AuthConfig, AuthState};
use leaguehub_core::storage::{
    MatchRepository, PlayerRepository, TeamRepository, UserRepository,
};

use crate::broadcast::StandingsBroadcaster;
use crate::cache::TieredCache;
use crate::community::ThreadBoard;
use crate::config::Config;
use crate::storage::SqliteRepository;
use crate::table::TableService;
use crate::worker::NotificationQueue;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Cached league table.
    pub table: TableService,
    /// Live standings subscribers.
    pub broadcaster: StandingsBroadcaster,
    pub notifications: NotificationQueue,
    pub threads: ThreadBoard,
    pub auth: AuthState,
    /// Per-message write timeout for websocket subscribers.
    pub send_timeout: Duration,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Shutdown signal sender for websocket sessions and the worker.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Wires the repository, cache tiers and queue into handler state.
    pub fn new(
        repo: Arc<SqliteRepository>,
        cache: TieredCache,
        notifications: NotificationQueue,
        auth_config: AuthConfig,
        config: &Config,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let users: Arc<dyn UserRepository> = repo.clone();

        Self {
            teams: repo.clone(),
            players: repo.clone(),
            matches: repo.clone(),
            users: users.clone(),
            table: TableService::new(repo, cache, config.table_cache_ttl()),
            broadcaster: StandingsBroadcaster::new(config.subscriber_buffer),
            notifications,
            threads: ThreadBoard::seeded(),
            auth: AuthState::new(users, auth_config),
            send_timeout: config.subscriber_send_timeout(),
            static_dir: config.static_dir.clone(),
            shutdown_tx,
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal websocket sessions and the worker to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
