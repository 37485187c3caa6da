//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use leaguehub_core::league::Role;

use crate::{validate_token, AuthError, AuthState};

/// Extractor for an authenticated caller. Rejects with 401 when no valid
/// token is presented.
///
/// The token is read from `Authorization: Bearer <token>` first and from the
/// auth cookie otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub role: Role,
}

/// Extractor for an authenticated administrator. Rejects with 401 like
/// [`CurrentUser`], and with 403 for authenticated non-admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser(pub CurrentUser);

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = match bearer_token(parts) {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(&auth_state.config.cookie_name)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(AuthError::MissingToken)?,
        };

        let claims = validate_token(&auth_state.config, &token)?;

        Ok(CurrentUser {
            user_id: claims.uid,
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            tracing::debug!(user_id = user.user_id, "Rejected non-admin caller");
            return Err(AuthError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
