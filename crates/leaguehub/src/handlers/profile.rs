//! Signed-in user's profile and personalized feed.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use leaguehub_auth::CurrentUser;
use leaguehub_core::league::{Match, MatchStatus, Team, User};

use crate::{
    handlers::{error::json_body, AppError},
    state::AppState,
};

const FEED_SIZE: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    /// Absent or 0 clears the favorite.
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Sets the favorite club (POST /api/profile/favorite).
pub async fn set_favorite(
    current: CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = json_body(payload)?;
    let team_id = request.team_id.filter(|id| *id > 0);

    state.users.set_favorite_team(current.user_id, team_id).await?;
    tracing::debug!(user_id = current.user_id, team_id = ?team_id, "Favorite team updated");

    Ok(Json(json!({ "status": "ok" })))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub favorite_team: Option<Team>,
}

async fn load_user(state: &AppState, user_id: i64) -> Result<(User, Option<Team>), AppError> {
    let user = state
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("not found"))?;

    let team = match user.favorite_team_id {
        Some(id) => state.teams.get_team(id).await?,
        None => None,
    };

    Ok((user, team))
}

/// The signed-in user with their favorite club (GET /api/profile/me).
pub async fn me(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let (user, favorite_team) = load_user(&state, current.user_id).await?;
    Ok(Json(ProfileResponse {
        user,
        favorite_team,
    }))
}

#[derive(Debug, Default, Serialize)]
pub struct FeedResponse {
    pub team: Option<Team>,
    pub upcoming: Vec<Match>,
    pub recent: Vec<Match>,
}

/// Splits a club's fixtures into the next unfinished ones (soonest first)
/// and the latest results (newest first).
pub fn build_feed(team: Team, matches: Vec<Match>, limit: usize) -> FeedResponse {
    let (mut recent, mut upcoming): (Vec<Match>, Vec<Match>) = matches
        .into_iter()
        .partition(|m| m.status == MatchStatus::Finished);

    upcoming.sort_by_key(|m| m.date);
    upcoming.truncate(limit);

    recent.sort_by_key(|m| std::cmp::Reverse(m.date));
    recent.truncate(limit);

    FeedResponse {
        team: Some(team),
        upcoming,
        recent,
    }
}

/// Fixtures for the favorite club (GET /api/feed).
///
/// Users without a favorite get an empty feed.
pub async fn feed(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<FeedResponse>, AppError> {
    let (_, team) = load_user(&state, current.user_id).await?;

    let Some(team) = team else {
        return Ok(Json(FeedResponse::default()));
    };

    let matches = state.matches.list_matches_for_team(team.id).await?;
    Ok(Json(build_feed(team, matches, FEED_SIZE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(id: i64, date: i64, status: MatchStatus) -> Match {
        Match {
            id,
            home_team_id: 1,
            away_team_id: 2,
            home_team: "Arsenal".into(),
            away_team: "Chelsea".into(),
            home_score: None,
            away_score: None,
            date,
            stadium: "Stadium".into(),
            status,
        }
    }

    #[test]
    fn test_feed_orders_upcoming_and_recent() {
        let matches = vec![
            fixture(1, 100, MatchStatus::Finished),
            fixture(2, 300, MatchStatus::Upcoming),
            fixture(3, 200, MatchStatus::Finished),
            fixture(4, 250, MatchStatus::Live),
        ];

        let feed = build_feed(Team::new("Arsenal", "ARS").with_id(1), matches, 5);

        let upcoming: Vec<i64> = feed.upcoming.iter().map(|m| m.id).collect();
        let recent: Vec<i64> = feed.recent.iter().map(|m| m.id).collect();
        assert_eq!(upcoming, vec![4, 2]);
        assert_eq!(recent, vec![3, 1]);
    }

    #[test]
    fn test_feed_respects_limit() {
        let matches = (0..8)
            .map(|i| fixture(i, i * 10, MatchStatus::Upcoming))
            .collect();

        let feed = build_feed(Team::new("Arsenal", "ARS"), matches, 3);
        assert_eq!(feed.upcoming.len(), 3);
        assert_eq!(feed.upcoming[0].id, 0);
    }
}
