use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use leaguehub_auth::AuthError;
use leaguehub_core::auth::ValidationError;
use leaguehub_core::storage::{repository_error_to_status_code, RepositoryError};

/// Request-level failures raised directly by handlers.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

/// Application error type that wraps `anyhow::Error`.
///
/// Known error types are mapped to their HTTP status; everything else is a
/// 500 whose details stay in the log. Bodies are `{"error": "..."}`.
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(RequestError::BadRequest(message.into()).into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self(RequestError::NotFound(message.into()).into())
    }

    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if let Some(auth_error) = self.0.downcast_ref::<AuthError>() {
            auth_error.status_code()
        } else if self.0.downcast_ref::<ValidationError>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(request_error) = self.0.downcast_ref::<RequestError>() {
            match request_error {
                RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
                RequestError::NotFound(_) => StatusCode::NOT_FOUND,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Unwraps a JSON body, turning any rejection into a 400 `invalid body`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(AppError::bad_request("invalid body"))
        }
    }
}
