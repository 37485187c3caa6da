//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use std::str::FromStr;

use leaguehub_core::league::{Match, MatchStatus, Player, PlayerStat, Role, Team, User};
use rusqlite::types::Type;
use rusqlite::Row;

/// Convert a SQLite row to a Team.
///
/// Expected columns: id, name, short_name, logo_url, primary_color,
/// secondary_color, points, matches_played, goal_diff
pub fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        short_name: row.get(2)?,
        logo_url: row.get(3)?,
        primary_color: row.get(4)?,
        secondary_color: row.get(5)?,
        points: row.get(6)?,
        matches_played: row.get(7)?,
        goal_diff: row.get(8)?,
    })
}

/// Convert a SQLite row to a Player without stats.
///
/// Expected columns: id, name, team_id, position
pub fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        team_id: row.get(2)?,
        position: row.get(3)?,
        stats: Vec::new(),
    })
}

/// Convert a SQLite row to a PlayerStat.
///
/// Expected columns: id, player_id, season, goals, assists, clean_sheets,
/// minutes_played
pub fn row_to_stat(row: &Row) -> rusqlite::Result<PlayerStat> {
    Ok(PlayerStat {
        id: row.get(0)?,
        player_id: row.get(1)?,
        season: row.get(2)?,
        goals: row.get(3)?,
        assists: row.get(4)?,
        clean_sheets: row.get(5)?,
        minutes_played: row.get(6)?,
    })
}

/// Convert a SQLite row to a Match.
///
/// Expected columns: id, home_team_id, away_team_id, home name, away name,
/// home_score, away_score, date, stadium, status
pub fn row_to_match(row: &Row) -> rusqlite::Result<Match> {
    let status: String = row.get(9)?;

    Ok(Match {
        id: row.get(0)?,
        home_team_id: row.get(1)?,
        away_team_id: row.get(2)?,
        home_team: row.get(3)?,
        away_team: row.get(4)?,
        home_score: row.get(5)?,
        away_score: row.get(6)?,
        date: row.get(7)?,
        stadium: row.get(8)?,
        status: parse_enum(9, &status)?,
    })
}

/// Convert a SQLite row to a User.
///
/// Expected columns: id, name, email, password_hash, role, favorite_team_id
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let role: String = row.get(4)?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: parse_enum::<Role>(4, &role)?,
        favorite_team_id: row.get(5)?,
    })
}

/// Parses a stored text column into one of the domain enums.
fn parse_enum<T>(column: usize, value: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        )
    })
}

/// Attaches stats to their players, keeping player order.
pub fn attach_stats(players: &mut [Player], stats: Vec<PlayerStat>) {
    for stat in stats {
        if let Some(player) = players.iter_mut().find(|p| p.id == stat.player_id) {
            player.stats.push(stat);
        }
    }
}

/// Storage form of a match status.
pub fn status_to_string(status: MatchStatus) -> &'static str {
    status.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enum_accepts_known_values() {
        assert_eq!(parse_enum::<MatchStatus>(0, "live").unwrap(), MatchStatus::Live);
        assert_eq!(parse_enum::<Role>(0, "admin").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_enum_rejects_unknown_values() {
        let err = parse_enum::<MatchStatus>(9, "postponed").unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::FromSqlConversionFailure(9, Type::Text, _)
        ));
    }

    #[test]
    fn test_attach_stats_groups_by_player() {
        let mut players = vec![
            Player {
                id: 1,
                name: "Saka".into(),
                team_id: 2,
                position: "FW".into(),
                stats: Vec::new(),
            },
            Player {
                id: 2,
                name: "Rice".into(),
                team_id: 2,
                position: "MF".into(),
                stats: Vec::new(),
            },
        ];
        let stat = |id, player_id| PlayerStat {
            id,
            player_id,
            season: "2025/26".into(),
            goals: 1,
            assists: 0,
            clean_sheets: 0,
            minutes_played: 90,
        };

        attach_stats(&mut players, vec![stat(1, 2), stat(2, 1), stat(3, 2), stat(4, 99)]);

        assert_eq!(players[0].stats.len(), 1);
        assert_eq!(players[1].stats.len(), 2);
    }

    #[test]
    fn test_status_to_string() {
        assert_eq!(status_to_string(MatchStatus::Finished), "finished");
    }
}
