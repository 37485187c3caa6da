mod app;
mod broadcast;
mod cache;
mod community;
mod config;
mod handlers;
mod state;
mod storage;
mod table;
mod worker;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leaguehub_auth::AuthConfig;

use crate::{
    app::create_app,
    cache::{RedisCache, TieredCache, TtlCache},
    config::Config,
    state::AppState,
    storage::{seed, SqliteRepository},
    worker::{spawn_notification_worker, NotificationQueue},
};

/// LeagueHub - Football league tables, fixtures and live standings
#[derive(Parser, Debug)]
#[command(name = "leaguehub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaguehub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
    seed(&repo, &config).await?;
    tracing::info!(path = %config.sqlite_path, "Storage ready");

    // External tier first; it reads as a permanent miss when REDIS_URL is
    // unset or the server was unreachable at startup.
    let redis = RedisCache::from_url(config.redis_url.as_deref(), config.external_cache_timeout()).await;
    let external = redis.is_enabled();
    let cache = TieredCache::default()
        .with_tier("redis", Arc::new(redis))
        .with_tier("memory", Arc::new(TtlCache::<Vec<u8>>::new()));
    tracing::info!(tiers = ?cache.tier_names(), external, "League table cache configured");

    let (notifications, notification_rx) = NotificationQueue::new(config.notification_queue_capacity);
    let state = AppState::new(repo, cache, notifications, AuthConfig::from_env(), &config);
    let worker = spawn_notification_worker(notification_rx, state.subscribe_shutdown());

    // Build the application router
    let app = create_app(state.clone());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    match worker.await {
        Ok(processed) => tracing::info!(processed, "Notification worker stopped"),
        Err(e) => tracing::warn!(error = %e, "Notification worker failed"),
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM), then close websocket
/// sessions and stop the worker.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    state.signal_shutdown();
}
