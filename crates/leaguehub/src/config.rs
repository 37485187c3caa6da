use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "leaguehub.db")
    pub sqlite_path: String,
    /// Redis connection URL. Unset disables the external cache tier.
    pub redis_url: Option<String>,
    /// League table TTL in seconds (default: 30)
    pub table_cache_ttl_seconds: u64,
    /// Upper bound on every external cache call (default: 500)
    pub external_cache_timeout_ms: u64,
    /// Per-subscriber queue length for live standings (default: 16)
    pub subscriber_buffer: usize,
    /// Per-message websocket write timeout (default: 2000)
    pub subscriber_send_timeout_ms: u64,
    /// Pending notification limit (default: 64)
    pub notification_queue_capacity: usize,
    /// Email of the seeded administrator (default: "admin@epl.local")
    pub admin_email: String,
    /// Password of the seeded administrator. Unset skips admin seeding.
    pub admin_password: Option<String>,
    /// Directory served under `/static` (default: "web/static")
    pub static_dir: String,
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "leaguehub.db")
    /// - `REDIS_URL` - Redis connection URL (default: unset, external cache disabled)
    /// - `TABLE_CACHE_TTL_SECONDS` - League table TTL (default: 30)
    /// - `EXTERNAL_CACHE_TIMEOUT_MS` - External cache call timeout (default: 500)
    /// - `SUBSCRIBER_BUFFER` - Live standings queue per subscriber (default: 16)
    /// - `SUBSCRIBER_SEND_TIMEOUT_MS` - Websocket write timeout (default: 2000)
    /// - `NOTIFICATION_QUEUE_CAPACITY` - Notification queue size (default: 64)
    /// - `ADMIN_EMAIL` - Seeded admin email (default: "admin@epl.local")
    /// - `ADMIN_PASSWORD` - Seeded admin password (default: unset, no admin)
    /// - `STATIC_DIR` - Static asset directory (default: "web/static")
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "leaguehub.db".to_string()),
            redis_url: non_empty("REDIS_URL"),
            table_cache_ttl_seconds: parsed("TABLE_CACHE_TTL_SECONDS", 30),
            external_cache_timeout_ms: parsed("EXTERNAL_CACHE_TIMEOUT_MS", 500),
            subscriber_buffer: parsed("SUBSCRIBER_BUFFER", 16),
            subscriber_send_timeout_ms: parsed("SUBSCRIBER_SEND_TIMEOUT_MS", 2_000),
            notification_queue_capacity: parsed("NOTIFICATION_QUEUE_CAPACITY", 64),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@epl.local".to_string()),
            admin_password: non_empty("ADMIN_PASSWORD"),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "web/static".to_string()),
        }
    }

    pub fn table_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.table_cache_ttl_seconds)
    }

    pub fn external_cache_timeout(&self) -> Duration {
        Duration::from_millis(self.external_cache_timeout_ms)
    }

    pub fn subscriber_send_timeout(&self) -> Duration {
        Duration::from_millis(self.subscriber_send_timeout_ms)
    }
}

impl Default for Config {
    /// Built-in defaults, independent of the environment.
    fn default() -> Self {
        Self {
            sqlite_path: "leaguehub.db".to_string(),
            redis_url: None,
            table_cache_ttl_seconds: 30,
            external_cache_timeout_ms: 500,
            subscriber_buffer: 16,
            subscriber_send_timeout_ms: 2_000,
            notification_queue_capacity: 64,
            admin_email: "admin@epl.local".to_string(),
            admin_password: None,
            static_dir: "web/static".to_string(),
        }
    }
}
