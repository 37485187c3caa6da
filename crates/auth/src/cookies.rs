use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::AuthConfig;

/// Builds the HttpOnly cookie that carries an auth token for browsers.
pub fn auth_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(config.token_ttl.as_secs() as i64))
        .build()
}

/// Builds a removal cookie matching [`auth_cookie`]'s name and path.
pub fn clear_auth_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}
