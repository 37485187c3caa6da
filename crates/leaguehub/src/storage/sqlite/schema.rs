//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    short_name TEXT NOT NULL DEFAULT '',
    logo_url TEXT NOT NULL DEFAULT '',
    primary_color TEXT NOT NULL DEFAULT '',
    secondary_color TEXT NOT NULL DEFAULT '',
    points INTEGER NOT NULL DEFAULT 0,
    matches_played INTEGER NOT NULL DEFAULT 0,
    goal_diff INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    team_id INTEGER NOT NULL,
    position TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (team_id) REFERENCES teams(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS player_stats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL,
    season TEXT NOT NULL,
    goals INTEGER NOT NULL DEFAULT 0,
    assists INTEGER NOT NULL DEFAULT 0,
    clean_sheets INTEGER NOT NULL DEFAULT 0,
    minutes_played INTEGER NOT NULL DEFAULT 0,
    UNIQUE (player_id, season),
    FOREIGN KEY (player_id) REFERENCES players(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    home_team_id INTEGER NOT NULL,
    away_team_id INTEGER NOT NULL,
    home_score INTEGER,
    away_score INTEGER,
    date INTEGER NOT NULL,
    stadium TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'upcoming',
    FOREIGN KEY (home_team_id) REFERENCES teams(id) ON DELETE CASCADE,
    FOREIGN KEY (away_team_id) REFERENCES teams(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    favorite_team_id INTEGER,
    FOREIGN KEY (favorite_team_id) REFERENCES teams(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_teams_standing ON teams(points DESC, goal_diff DESC);
CREATE INDEX IF NOT EXISTS idx_players_team_id ON players(team_id);
CREATE INDEX IF NOT EXISTS idx_player_stats_player_id ON player_stats(player_id);
CREATE INDEX IF NOT EXISTS idx_matches_home ON matches(home_team_id);
CREATE INDEX IF NOT EXISTS idx_matches_away ON matches(away_team_id);
CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(date);
"#;

// Team queries

pub const SELECT_TEAMS: &str = r#"
SELECT id, name, short_name, logo_url, primary_color, secondary_color, points, matches_played, goal_diff
FROM teams
ORDER BY id
"#;

/// Ties beyond points and goal difference fall back to insertion order.
pub const SELECT_TEAMS_BY_STANDING: &str = r#"
SELECT id, name, short_name, logo_url, primary_color, secondary_color, points, matches_played, goal_diff
FROM teams
ORDER BY points DESC, goal_diff DESC, id ASC
"#;

pub const SELECT_TEAM_BY_ID: &str = r#"
SELECT id, name, short_name, logo_url, primary_color, secondary_color, points, matches_played, goal_diff
FROM teams
WHERE id = ?1
"#;

pub const INSERT_TEAM: &str = r#"
INSERT INTO teams (name, short_name, logo_url, primary_color, secondary_color, points, matches_played, goal_diff)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const UPDATE_TEAM: &str = r#"
UPDATE teams
SET name = ?2, short_name = ?3, logo_url = ?4, primary_color = ?5, secondary_color = ?6,
    points = ?7, matches_played = ?8, goal_diff = ?9
WHERE id = ?1
"#;

pub const APPLY_TEAM_RECORD: &str = r#"
UPDATE teams
SET points = ?2, matches_played = ?3, goal_diff = ?4
WHERE id = ?1
"#;

pub const COUNT_TEAMS: &str = "SELECT COUNT(*) FROM teams";

// Player queries
pub const SELECT_PLAYERS: &str = r#"
SELECT id, name, team_id, position
FROM players
ORDER BY id
"#;

pub const SELECT_PLAYERS_BY_TEAM: &str = r#"
SELECT id, name, team_id, position
FROM players
WHERE team_id = ?1
ORDER BY id
"#;

pub const SELECT_PLAYER_BY_ID: &str = r#"
SELECT id, name, team_id, position
FROM players
WHERE id = ?1
"#;

pub const INSERT_PLAYER: &str = r#"
INSERT INTO players (name, team_id, position)
VALUES (?1, ?2, ?3)
"#;

pub const UPDATE_PLAYER: &str = r#"
UPDATE players
SET name = ?2, team_id = ?3, position = ?4
WHERE id = ?1
"#;

pub const COUNT_PLAYERS: &str = "SELECT COUNT(*) FROM players";

pub const SELECT_STATS: &str = r#"
SELECT id, player_id, season, goals, assists, clean_sheets, minutes_played
FROM player_stats
ORDER BY player_id, season
"#;

pub const SELECT_STATS_BY_PLAYER: &str = r#"
SELECT id, player_id, season, goals, assists, clean_sheets, minutes_played
FROM player_stats
WHERE player_id = ?1
ORDER BY season
"#;

pub const UPSERT_STAT: &str = r#"
INSERT INTO player_stats (player_id, season, goals, assists, clean_sheets, minutes_played)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT (player_id, season) DO UPDATE SET
    goals = excluded.goals,
    assists = excluded.assists,
    clean_sheets = excluded.clean_sheets,
    minutes_played = excluded.minutes_played
"#;

// Match queries
pub const SELECT_MATCHES: &str = r#"
SELECT m.id, m.home_team_id, m.away_team_id, h.name, a.name,
       m.home_score, m.away_score, m.date, m.stadium, m.status
FROM matches m
JOIN teams h ON h.id = m.home_team_id
JOIN teams a ON a.id = m.away_team_id
ORDER BY m.date, m.id
"#;

pub const SELECT_MATCHES_FOR_TEAM: &str = r#"
SELECT m.id, m.home_team_id, m.away_team_id, h.name, a.name,
       m.home_score, m.away_score, m.date, m.stadium, m.status
FROM matches m
JOIN teams h ON h.id = m.home_team_id
JOIN teams a ON a.id = m.away_team_id
WHERE m.home_team_id = ?1 OR m.away_team_id = ?1
ORDER BY m.date, m.id
"#;

pub const SELECT_MATCH_BY_ID: &str = r#"
SELECT m.id, m.home_team_id, m.away_team_id, h.name, a.name,
       m.home_score, m.away_score, m.date, m.stadium, m.status
FROM matches m
JOIN teams h ON h.id = m.home_team_id
JOIN teams a ON a.id = m.away_team_id
WHERE m.id = ?1
"#;

pub const INSERT_MATCH: &str = r#"
INSERT INTO matches (home_team_id, away_team_id, home_score, away_score, date, stadium, status)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const UPDATE_MATCH_RESULT: &str = r#"
UPDATE matches
SET home_score = ?2, away_score = ?3, status = ?4
WHERE id = ?1
"#;

pub const COUNT_MATCHES: &str = "SELECT COUNT(*) FROM matches";

// User queries
pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, password_hash, role, favorite_team_id
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, name, email, password_hash, role, favorite_team_id
FROM users
WHERE email = ?1
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (name, email, password_hash, role, favorite_team_id)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_FAVORITE_TEAM: &str = r#"
UPDATE users
SET favorite_team_id = ?2
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM_COLUMNS: &str =
        "id, name, short_name, logo_url, primary_color, secondary_color, points, matches_played, goal_diff";

    #[test]
    fn test_team_queries_share_column_order() {
        for query in [SELECT_TEAMS, SELECT_TEAMS_BY_STANDING, SELECT_TEAM_BY_ID] {
            assert!(query.contains(TEAM_COLUMNS), "{query}");
        }
    }

    #[test]
    fn test_schema_enables_foreign_keys() {
        assert!(CREATE_TABLES.contains("PRAGMA foreign_keys = ON"));
    }
}
