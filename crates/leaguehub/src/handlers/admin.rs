//! Administrator writes. Changes that move the table are pushed to live
//! subscribers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use leaguehub_auth::AdminUser;
use leaguehub_core::league::{
    Match, MatchResultRequest, Player, StandingsMessage, Team, UpsertPlayerRequest,
    UpsertTeamRequest,
};

use crate::{
    handlers::{error::json_body, AppError},
    state::AppState,
    worker::Notification,
};

/// Recomputes the table and pushes it to every live subscriber.
///
/// The triggering write has already been committed, so a failed recompute is
/// logged rather than reported to the caller. The revision is taken before
/// the recompute: when two writes publish concurrently, the table computed
/// later wins and the earlier one is dropped by the broadcaster.
pub async fn publish_standings(state: &AppState) {
    let revision = state.broadcaster.next_revision();
    let rows = match state.table.refresh().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to recompute standings after write");
            return;
        }
    };

    let delivered = state
        .broadcaster
        .broadcast(revision, StandingsMessage::new(rows));
    state
        .notifications
        .enqueue(Notification::StandingsPublished { delivered });
}

/// Creates or updates a club (POST /api/admin/teams).
pub async fn upsert_team(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<UpsertTeamRequest>, JsonRejection>,
) -> Result<Json<Team>, AppError> {
    let request = json_body(payload)?;
    if request.name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    let team = state.teams.upsert_team(&request.into_team()).await?;
    tracing::info!(admin_id = admin.user_id, team_id = team.id, "Team saved");

    publish_standings(&state).await;
    Ok(Json(team))
}

/// Creates or updates a player (POST /api/admin/players).
pub async fn upsert_player(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<UpsertPlayerRequest>, JsonRejection>,
) -> Result<Json<Player>, AppError> {
    let request = json_body(payload)?;
    if request.name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    let player = state.players.upsert_player(&request.into_player()).await?;
    tracing::info!(admin_id = admin.user_id, player_id = player.id, "Player saved");

    Ok(Json(player))
}

/// Records a score and status (POST /api/admin/matches/{id}/result).
pub async fn record_result(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<MatchResultRequest>, JsonRejection>,
) -> Result<Json<Match>, AppError> {
    let request = json_body(payload)?;
    if request.home < 0 || request.away < 0 {
        return Err(AppError::bad_request("scores must not be negative"));
    }

    let updated = state
        .matches
        .record_result(id, request.home, request.away, request.status)
        .await?;
    tracing::info!(
        admin_id = admin.user_id,
        match_id = id,
        status = %updated.status,
        "Result recorded"
    );

    state.notifications.enqueue(Notification::ResultRecorded {
        match_id: id,
        home: request.home,
        away: request.away,
    });

    publish_standings(&state).await;
    Ok(Json(updated))
}
