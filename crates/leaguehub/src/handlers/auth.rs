//! Registration, login and logout.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use leaguehub_auth::{auth_cookie, clear_auth_cookie, LoginOutcome};

use crate::{
    handlers::{error::json_body, AppError},
    state::AppState,
    worker::Notification,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub favorite_team: Option<i64>,
}

/// Creates an account (POST /api/auth/register).
///
/// Responds with `{"user": ...}`. A favorite team given at sign-up is
/// stored right away.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = json_body(payload)?;

    let mut user = leaguehub_auth::register(
        &state.auth,
        &request.name,
        &request.email,
        &request.password,
    )
    .await?;

    if let Some(team_id) = request.favorite_team.filter(|id| *id > 0) {
        state.users.set_favorite_team(user.id, Some(team_id)).await?;
        user.favorite_team_id = Some(team_id);
    }

    state.notifications.enqueue(Notification::UserRegistered {
        user_id: user.id,
        name: user.name.clone(),
    });

    Ok(Json(json!({ "user": user })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Verifies credentials (POST /api/auth/login).
///
/// The token is returned in the body and also set as an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginOutcome>), AppError> {
    let request = json_body(payload)?;

    let outcome = leaguehub_auth::login(&state.auth, &request.email, &request.password).await?;
    tracing::info!(user_id = outcome.user.id, "User logged in");

    let jar = jar.add(auth_cookie(&state.auth.config, outcome.token.clone()));
    Ok((jar, Json(outcome)))
}

/// Clears the auth cookie (POST /api/auth/logout).
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(clear_auth_cookie(&state.auth.config));
    (jar, Json(json!({ "status": "ok" })))
}
