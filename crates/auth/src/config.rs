use std::time::Duration;

/// Development fallback for `JWT_SECRET`. Never use it in production.
const DEV_JWT_SECRET: &str = "leaguehub-dev-secret-change-me";

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Creates a configuration with the given signing secret and defaults
    /// for everything else.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            cookie_name: "auth_token".to_string(),
            cookie_secure: false,
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC secret used to sign tokens (default: a development secret)
    /// - `TOKEN_TTL_HOURS`: Token and cookie lifetime in hours (default: 24)
    /// - `COOKIE_SECURE`: Whether to set the secure flag on the auth cookie (default: false)
    pub fn from_env() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let token_ttl = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 60 * 60))
            .unwrap_or(Duration::from_secs(24 * 60 * 60));

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            jwt_secret,
            token_ttl,
            cookie_secure,
            ..Self::new(String::new())
        }
    }
}
