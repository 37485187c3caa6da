//! Optional Redis cache tier.
//!
//! An unconfigured client behaves like a cache that never holds anything:
//! reads miss and writes are dropped. Every remote call is bounded by a
//! timeout so a slow server cannot stall a request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use leaguehub_core::cache::{Cache, CacheError, Result};

/// Maps Redis errors to CacheError.
fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Redis cache backend using a connection manager for reconnects.
#[derive(Clone)]
pub struct RedisCache {
    conn: Option<ConnectionManager>,
    timeout: Duration,
}

impl RedisCache {
    /// A client with no server behind it.
    pub fn disabled() -> Self {
        Self {
            conn: None,
            timeout: Duration::from_millis(500),
        }
    }

    /// Connects to `url`, bounding the handshake by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the URL is invalid or the
    /// server cannot be reached, and `CacheError::Timeout` if the handshake
    /// does not finish in time.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = with_timeout(timeout, async {
            ConnectionManager::new(client).await.map_err(map_redis_error)
        })
        .await?;

        Ok(Self {
            conn: Some(conn),
            timeout,
        })
    }

    /// Connects when a URL is configured, falling back to a disabled client
    /// when it is absent or the server is unreachable.
    pub async fn from_url(url: Option<&str>, timeout: Duration) -> Self {
        let Some(url) = url else {
            tracing::info!("REDIS_URL not set, external cache disabled");
            return Self {
                timeout,
                ..Self::disabled()
            };
        };

        match Self::connect(url, timeout).await {
            Ok(cache) => {
                tracing::info!("Connected to external cache");
                cache
            }
            Err(e) => {
                tracing::warn!(error = %e, "External cache unavailable, continuing without it");
                Self {
                    timeout,
                    ..Self::disabled()
                }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some()
    }
}

async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(CacheError::Timeout(limit.as_millis())),
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(conn) = &self.conn else {
            return Ok(None);
        };
        let mut conn = conn.clone();

        with_timeout(self.timeout, async move {
            conn.get::<_, Option<Vec<u8>>>(key)
                .await
                .map_err(map_redis_error)
        })
        .await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let Some(conn) = &self.conn else {
            return Ok(());
        };
        let mut conn = conn.clone();
        let seconds = ttl.as_secs().max(1);

        with_timeout(self.timeout, async move {
            conn.set_ex::<_, _, ()>(key, value, seconds)
                .await
                .map_err(map_redis_error)
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let Some(conn) = &self.conn else {
            return Ok(());
        };
        let mut conn = conn.clone();

        with_timeout(self.timeout, async move {
            conn.del::<_, ()>(key).await.map_err(map_redis_error)
        })
        .await
    }
}
