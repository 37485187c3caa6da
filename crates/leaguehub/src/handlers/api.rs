//! Public read-only JSON API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use leaguehub_core::league::{
    ranked_stats, LeaderboardEntry, Match, Player, StatMetric, TableRow, Team,
};

use crate::{handlers::AppError, state::AppState};

const LEADERBOARD_SIZE: usize = 5;

/// League table (GET /api/table).
pub async fn get_table(State(state): State<AppState>) -> Result<Json<Vec<TableRow>>, AppError> {
    Ok(Json(state.table.compute().await?))
}

/// All clubs (GET /api/teams).
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(state.teams.list_teams().await?))
}

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    #[serde(rename = "teamId")]
    pub team_id: Option<String>,
}

impl PlayersQuery {
    /// A missing, unparsable or non-positive `teamId` means "all teams".
    fn team_filter(&self) -> Option<i64> {
        self.team_id
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
    }
}

/// Players, optionally for one club (GET /api/players?teamId=).
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<Vec<Player>>, AppError> {
    Ok(Json(state.players.list_players(query.team_filter()).await?))
}

/// All fixtures, by kickoff (GET /api/matches).
pub async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(state.matches.list_matches().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub top_scorers: Vec<LeaderboardEntry>,
    pub top_assisters: Vec<LeaderboardEntry>,
    pub clean_sheets: Vec<LeaderboardEntry>,
}

/// Leaderboards built from stored player stats (GET /api/stats).
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let players = state.players.list_players(None).await?;

    Ok(Json(StatsResponse {
        top_scorers: ranked_stats(&players, StatMetric::Goals, LEADERBOARD_SIZE),
        top_assisters: ranked_stats(&players, StatMetric::Assists, LEADERBOARD_SIZE),
        clean_sheets: ranked_stats(&players, StatMetric::CleanSheets, LEADERBOARD_SIZE),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_filter() {
        let query = |v: Option<&str>| PlayersQuery {
            team_id: v.map(str::to_string),
        };

        assert_eq!(query(Some("3")).team_filter(), Some(3));
        assert_eq!(query(Some("abc")).team_filter(), None);
        assert_eq!(query(Some("0")).team_filter(), None);
        assert_eq!(query(None).team_filter(), None);
    }
}
