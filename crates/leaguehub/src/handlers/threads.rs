//! Match discussion threads (GET /api/threads, POST /api/threads/comment).

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::{
    community::Thread,
    handlers::{error::json_body, AppError},
    state::AppState,
};

pub async fn list_threads(State(state): State<AppState>) -> Json<Vec<Thread>> {
    Json(state.threads.list())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub thread_id: i64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub message: String,
}

/// Appends a comment and returns the whole thread.
pub async fn post_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<Thread>, AppError> {
    let request = json_body(payload)?;
    if request.message.trim().is_empty() {
        return Err(AppError::bad_request("message is required"));
    }

    state
        .threads
        .add_comment(request.thread_id, &request.user, &request.message)
        .map(Json)
        .ok_or_else(|| AppError::not_found("thread not found"))
}
