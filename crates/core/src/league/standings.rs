use std::cmp::Ordering;

use super::types::{TableRow, Team};

/// Points awarded for a win.
pub const POINTS_FOR_WIN: i64 = 3;
/// Points awarded for a draw.
pub const POINTS_FOR_DRAW: i64 = 1;

/// Maps teams to table rows, preserving the input order.
pub fn table_rows(teams: &[Team]) -> Vec<TableRow> {
    teams.iter().map(TableRow::from).collect()
}

/// Orders rows by points descending, then goal difference descending.
///
/// The sort is stable: rows that tie on both keys keep their incoming order.
pub fn sort_standings(rows: &mut [TableRow]) {
    rows.sort_by(|a, b| match b.points.cmp(&a.points) {
        Ordering::Equal => b.gd.cmp(&a.gd),
        other => other,
    });
}

/// Result of a match from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    pub fn from_score(home_goals: i64, away_goals: i64) -> Self {
        match home_goals.cmp(&away_goals) {
            Ordering::Greater => Self::HomeWin,
            Ordering::Equal => Self::Draw,
            Ordering::Less => Self::AwayWin,
        }
    }

    /// Points earned by (home, away).
    pub fn points(&self) -> (i64, i64) {
        match self {
            Self::HomeWin => (POINTS_FOR_WIN, 0),
            Self::Draw => (POINTS_FOR_DRAW, POINTS_FOR_DRAW),
            Self::AwayWin => (0, POINTS_FOR_WIN),
        }
    }
}

/// Applies a final score to both clubs' standings counters.
pub fn apply_result(home: &mut Team, away: &mut Team, home_goals: i64, away_goals: i64) {
    let (home_points, away_points) = MatchOutcome::from_score(home_goals, away_goals).points();
    let margin = home_goals - away_goals;

    home.matches_played += 1;
    home.points += home_points;
    home.goal_diff += margin;

    away.matches_played += 1;
    away.points += away_points;
    away.goal_diff -= margin;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str, points: i64, gd: i64) -> Team {
        Team::new(name, &name[..1]).with_id(id).with_record(10, points, gd)
    }

    #[test]
    fn test_sort_by_points_then_goal_difference() {
        let teams = vec![team(1, "A", 50, 10), team(2, "B", 50, 20), team(3, "C", 60, 0)];
        let mut rows = table_rows(&teams);

        sort_standings(&mut rows);

        let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_keeps_full_ties_in_input_order() {
        let teams = vec![team(1, "X", 30, 5), team(2, "Y", 30, 5), team(3, "Z", 30, 5)];
        let mut rows = table_rows(&teams);

        sort_standings(&mut rows);

        let ids: Vec<i64> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_table_rows_preserves_order() {
        let teams = vec![team(7, "Leeds", 1, -3), team(4, "Fulham", 9, 2)];
        let rows = table_rows(&teams);

        assert_eq!(rows[0].team_id, 7);
        assert_eq!(rows[1].team_id, 4);
    }

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(MatchOutcome::from_score(2, 1), MatchOutcome::HomeWin);
        assert_eq!(MatchOutcome::from_score(0, 0), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::from_score(1, 3), MatchOutcome::AwayWin);
    }

    #[test]
    fn test_apply_home_win() {
        let mut home = Team::new("Arsenal", "ARS");
        let mut away = Team::new("Chelsea", "CHE");

        apply_result(&mut home, &mut away, 3, 1);

        assert_eq!((home.matches_played, home.points, home.goal_diff), (1, 3, 2));
        assert_eq!((away.matches_played, away.points, away.goal_diff), (1, 0, -2));
    }

    #[test]
    fn test_apply_draw() {
        let mut home = Team::new("Liverpool", "LIV").with_record(4, 7, 3);
        let mut away = Team::new("Everton", "EVE").with_record(4, 4, -1);

        apply_result(&mut home, &mut away, 2, 2);

        assert_eq!((home.matches_played, home.points, home.goal_diff), (5, 8, 3));
        assert_eq!((away.matches_played, away.points, away.goal_diff), (5, 5, -1));
    }

    #[test]
    fn test_apply_away_win() {
        let mut home = Team::new("Wolves", "WOL");
        let mut away = Team::new("Man City", "MCI");

        apply_result(&mut home, &mut away, 0, 4);

        assert_eq!(home.points, 0);
        assert_eq!(home.goal_diff, -4);
        assert_eq!(away.points, 3);
        assert_eq!(away.goal_diff, 4);
    }
}
