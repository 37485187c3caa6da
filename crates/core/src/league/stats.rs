use serde::{Deserialize, Serialize};

use super::types::{Player, PlayerStat};

/// Statistic used to rank players on a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatMetric {
    Goals,
    Assists,
    CleanSheets,
}

impl StatMetric {
    fn value(&self, stat: &PlayerStat) -> i64 {
        match self {
            Self::Goals => stat.goals,
            Self::Assists => stat.assists,
            Self::CleanSheets => stat.clean_sheets,
        }
    }
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: i64,
    pub player: String,
    pub team_id: i64,
    pub value: i64,
}

/// Returns the top `limit` players for `metric`, summed across seasons.
///
/// Players with a zero total are left out. Ties keep the incoming player
/// order.
pub fn ranked_stats(players: &[Player], metric: StatMetric, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .map(|p| LeaderboardEntry {
            player_id: p.id,
            player: p.name.clone(),
            team_id: p.team_id,
            value: p.stats.iter().map(|s| metric.value(s)).sum(),
        })
        .filter(|e| e.value > 0)
        .collect();

    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, name: &str, goals: &[i64], clean_sheets: i64) -> Player {
        Player {
            id,
            name: name.to_string(),
            team_id: 1,
            position: "FW".to_string(),
            stats: goals
                .iter()
                .enumerate()
                .map(|(i, g)| PlayerStat {
                    id: i as i64,
                    player_id: id,
                    season: format!("202{i}/2{}", i + 1),
                    goals: *g,
                    assists: 0,
                    clean_sheets,
                    minutes_played: 900,
                })
                .collect(),
        }
    }

    #[test]
    fn test_ranks_by_summed_metric() {
        let players = vec![
            player(1, "Salah", &[10, 5], 0),
            player(2, "Haaland", &[18], 0),
            player(3, "Saka", &[4, 4], 0),
        ];

        let top = ranked_stats(&players, StatMetric::Goals, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player, "Haaland");
        assert_eq!(top[0].value, 18);
        assert_eq!(top[1].player, "Salah");
        assert_eq!(top[1].value, 15);
    }

    #[test]
    fn test_skips_players_without_the_metric() {
        let players = vec![player(1, "Alisson", &[0], 11), player(2, "Nunez", &[7], 0)];

        let keepers = ranked_stats(&players, StatMetric::CleanSheets, 10);
        assert_eq!(keepers.len(), 1);
        assert_eq!(keepers[0].player, "Alisson");

        let assists = ranked_stats(&players, StatMetric::Assists, 10);
        assert!(assists.is_empty());
    }
}
