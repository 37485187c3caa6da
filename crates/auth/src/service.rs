//! Registration and login over a user repository.

use leaguehub_core::auth::{validate_login, validate_registration};
use leaguehub_core::league::User;
use leaguehub_core::storage::RepositoryError;
use serde::Serialize;

use crate::{hash_password, issue_token, verify_password, AuthError, AuthState};

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Registers a new regular user.
///
/// Fails with [`AuthError::EmailTaken`] when the (normalized) email is
/// already in use.
pub async fn register(
    state: &AuthState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let registration = validate_registration(name, email, password)?;

    if state
        .users
        .get_user_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(AuthError::EmailTaken);
    }

    let hash = hash_password(&registration.password)?;
    let user = User::new(registration.name, registration.email, hash);

    let user = state.users.create_user(&user).await.map_err(|e| match e {
        RepositoryError::AlreadyExists { .. } => AuthError::EmailTaken,
        other => AuthError::Storage(other),
    })?;

    tracing::info!(user_id = user.id, "Registered user");
    Ok(user)
}

/// Verifies credentials and issues a token.
///
/// Unknown emails and wrong passwords produce the same
/// [`AuthError::InvalidCredentials`].
pub async fn login(state: &AuthState, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
    let credentials = validate_login(email, password)?;

    let user = state
        .users
        .get_user_by_email(&credentials.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&credentials.password, &user.password_hash) {
        tracing::debug!(user_id = user.id, "Password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_token(&state.config, user.id, user.role)?;
    Ok(LoginOutcome { token, user })
}
