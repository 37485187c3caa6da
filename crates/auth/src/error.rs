use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leaguehub_core::auth::ValidationError;
use leaguehub_core::storage::RepositoryError;
use thiserror::Error;

/// Auth errors for the leaguehub_auth crate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed registration or login payload.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("missing credentials")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("admin role required")]
    Forbidden,

    #[error("token error: {0}")]
    Token(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Token(_) | AuthError::PasswordHash(_) | AuthError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Auth error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
