use serde::Deserialize;

use super::types::{MatchStatus, Player, Team};

/// Admin payload for creating or updating a team.
///
/// `id` absent (or 0) creates a new team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTeamRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub matches_played: i64,
    #[serde(default)]
    pub goal_diff: i64,
}

impl UpsertTeamRequest {
    pub fn into_team(self) -> Team {
        Team {
            id: self.id.unwrap_or(0),
            name: self.name,
            short_name: self.short_name,
            logo_url: self.logo_url,
            primary_color: self.primary_color,
            secondary_color: self.secondary_color,
            points: self.points,
            matches_played: self.matches_played,
            goal_diff: self.goal_diff,
        }
    }
}

/// Admin payload for creating or updating a player.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPlayerRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub team_id: i64,
    #[serde(default)]
    pub position: String,
}

impl UpsertPlayerRequest {
    pub fn into_player(self) -> Player {
        Player {
            id: self.id.unwrap_or(0),
            name: self.name,
            team_id: self.team_id,
            position: self.position,
            stats: Vec::new(),
        }
    }
}

/// Admin payload for recording a match score.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResultRequest {
    pub home: i64,
    pub away: i64,
    pub status: MatchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_request_defaults() {
        let request: UpsertTeamRequest =
            serde_json::from_str(r#"{"name": "Brentford", "shortName": "BRE"}"#).unwrap();
        let team = request.into_team();

        assert_eq!(team.id, 0);
        assert_eq!(team.name, "Brentford");
        assert_eq!(team.short_name, "BRE");
        assert_eq!(team.points, 0);
    }

    #[test]
    fn test_match_result_request_parses_status() {
        let request: MatchResultRequest =
            serde_json::from_str(r#"{"home": 2, "away": 0, "status": "finished"}"#).unwrap();

        assert_eq!(request.status, MatchStatus::Finished);
    }
}
