//! SQLite repository implementation.
//!
//! Implements the repository traits from `leaguehub_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use leaguehub_core::league::{apply_result, Match, MatchStatus, Player, PlayerStat, Team, User};
use leaguehub_core::storage::{
    MatchRepository, PlayerRepository, RepositoryError, Result, TeamRepository, UserRepository,
};

use super::conversions::{
    attach_stats, row_to_match, row_to_player, row_to_stat, row_to_team, row_to_user,
    status_to_string,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn count(&self, query: &'static str, entity_type: &'static str) -> Result<i64> {
        self.conn
            .call(move |conn| {
                conn.query_row(query, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type))
    }

    pub async fn team_count(&self) -> Result<i64> {
        self.count(schema::COUNT_TEAMS, "Team").await
    }

    pub async fn player_count(&self) -> Result<i64> {
        self.count(schema::COUNT_PLAYERS, "Player").await
    }

    pub async fn match_count(&self) -> Result<i64> {
        self.count(schema::COUNT_MATCHES, "Match").await
    }

    /// Schedules a fixture. Returns it with its assigned ID and team names.
    pub async fn create_match(&self, fixture: &Match) -> Result<Match> {
        let fixture = fixture.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_MATCH,
                    rusqlite::params![
                        fixture.home_team_id,
                        fixture.away_team_id,
                        fixture.home_score,
                        fixture.away_score,
                        fixture.date,
                        fixture.stadium,
                        status_to_string(fixture.status)
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_MATCH_BY_ID, [id], row_to_match)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Match"))
    }

    /// Inserts or replaces the stat line for a player's season.
    pub async fn upsert_player_stat(&self, stat: &PlayerStat) -> Result<()> {
        let stat = stat.clone();
        let player_id = stat.player_id;

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_STAT,
                    rusqlite::params![
                        stat.player_id,
                        stat.season,
                        stat.goals,
                        stat.assists,
                        stat.clean_sheets,
                        stat.minutes_played
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "PlayerStat", player_id.to_string()))
    }
}

// ============================================================================
// TeamRepository implementation
// ============================================================================

fn query_teams(conn: &rusqlite::Connection, query: &str) -> tokio_rusqlite::Result<Vec<Team>> {
    let mut stmt = conn.prepare(query).map_err(wrap_err)?;
    let rows = stmt.query_map([], row_to_team).map_err(wrap_err)?;

    let mut teams = Vec::new();
    for row_result in rows {
        teams.push(row_result.map_err(wrap_err)?);
    }
    Ok(teams)
}

#[async_trait]
impl TeamRepository for SqliteRepository {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        self.conn
            .call(|conn| query_teams(conn, schema::SELECT_TEAMS))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Team"))
    }

    async fn list_teams_by_standing(&self) -> Result<Vec<Team>> {
        self.conn
            .call(|conn| query_teams(conn, schema::SELECT_TEAMS_BY_STANDING))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Team"))
    }

    async fn get_team(&self, id: i64) -> Result<Option<Team>> {
        self.conn
            .call(move |conn| {
                match conn.query_row(schema::SELECT_TEAM_BY_ID, [id], row_to_team) {
                    Ok(team) => Ok(Some(team)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Team", id.to_string()))
    }

    async fn upsert_team(&self, team: &Team) -> Result<Team> {
        let mut team = team.clone();
        let label = if team.id == 0 {
            team.name.clone()
        } else {
            team.id.to_string()
        };

        self.conn
            .call(move |conn| {
                if team.id == 0 {
                    conn.execute(
                        schema::INSERT_TEAM,
                        rusqlite::params![
                            team.name,
                            team.short_name,
                            team.logo_url,
                            team.primary_color,
                            team.secondary_color,
                            team.points,
                            team.matches_played,
                            team.goal_diff
                        ],
                    )
                    .map_err(wrap_err)?;
                    team.id = conn.last_insert_rowid();
                } else {
                    let rows = conn
                        .execute(
                            schema::UPDATE_TEAM,
                            rusqlite::params![
                                team.id,
                                team.name,
                                team.short_name,
                                team.logo_url,
                                team.primary_color,
                                team.secondary_color,
                                team.points,
                                team.matches_played,
                                team.goal_diff
                            ],
                        )
                        .map_err(wrap_err)?;
                    if rows == 0 {
                        return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                    }
                }
                Ok(team)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Team", label))
    }
}

// ============================================================================
// PlayerRepository implementation
// ============================================================================

#[async_trait]
impl PlayerRepository for SqliteRepository {
    async fn list_players(&self, team_id: Option<i64>) -> Result<Vec<Player>> {
        self.conn
            .call(move |conn| {
                let mut players = Vec::new();
                {
                    let mut stmt = match team_id {
                        Some(_) => conn.prepare(schema::SELECT_PLAYERS_BY_TEAM),
                        None => conn.prepare(schema::SELECT_PLAYERS),
                    }
                    .map_err(wrap_err)?;
                    let rows = match team_id {
                        Some(id) => stmt.query_map([id], row_to_player),
                        None => stmt.query_map([], row_to_player),
                    }
                    .map_err(wrap_err)?;
                    for row_result in rows {
                        players.push(row_result.map_err(wrap_err)?);
                    }
                }

                let mut stats = Vec::new();
                {
                    let mut stmt = conn.prepare(schema::SELECT_STATS).map_err(wrap_err)?;
                    let rows = stmt.query_map([], row_to_stat).map_err(wrap_err)?;
                    for row_result in rows {
                        stats.push(row_result.map_err(wrap_err)?);
                    }
                }

                attach_stats(&mut players, stats);
                Ok(players)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Player"))
    }

    async fn upsert_player(&self, player: &Player) -> Result<Player> {
        let mut player = player.clone();
        let label = if player.id == 0 {
            player.name.clone()
        } else {
            player.id.to_string()
        };

        self.conn
            .call(move |conn| {
                if player.id == 0 {
                    conn.execute(
                        schema::INSERT_PLAYER,
                        rusqlite::params![player.name, player.team_id, player.position],
                    )
                    .map_err(wrap_err)?;
                    player.id = conn.last_insert_rowid();
                } else {
                    let rows = conn
                        .execute(
                            schema::UPDATE_PLAYER,
                            rusqlite::params![player.id, player.name, player.team_id, player.position],
                        )
                        .map_err(wrap_err)?;
                    if rows == 0 {
                        return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                    }
                }

                let mut saved = conn
                    .query_row(schema::SELECT_PLAYER_BY_ID, [player.id], row_to_player)
                    .map_err(wrap_err)?;

                let mut stmt = conn
                    .prepare(schema::SELECT_STATS_BY_PLAYER)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([saved.id], row_to_stat).map_err(wrap_err)?;
                for row_result in rows {
                    saved.stats.push(row_result.map_err(wrap_err)?);
                }
                Ok(saved)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Player", label))
    }
}

// ============================================================================
// MatchRepository implementation
// ============================================================================

fn query_matches(
    conn: &rusqlite::Connection,
    team_id: Option<i64>,
) -> tokio_rusqlite::Result<Vec<Match>> {
    let mut stmt = match team_id {
        Some(_) => conn.prepare(schema::SELECT_MATCHES_FOR_TEAM),
        None => conn.prepare(schema::SELECT_MATCHES),
    }
    .map_err(wrap_err)?;
    let rows = match team_id {
        Some(id) => stmt.query_map([id], row_to_match),
        None => stmt.query_map([], row_to_match),
    }
    .map_err(wrap_err)?;

    let mut matches = Vec::new();
    for row_result in rows {
        matches.push(row_result.map_err(wrap_err)?);
    }
    Ok(matches)
}

#[async_trait]
impl MatchRepository for SqliteRepository {
    async fn list_matches(&self) -> Result<Vec<Match>> {
        self.conn
            .call(|conn| query_matches(conn, None))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Match"))
    }

    async fn list_matches_for_team(&self, team_id: i64) -> Result<Vec<Match>> {
        self.conn
            .call(move |conn| query_matches(conn, Some(team_id)))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Match"))
    }

    async fn record_result(
        &self,
        id: i64,
        home_score: i64,
        away_score: i64,
        status: MatchStatus,
    ) -> Result<Match> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let current = tx
                    .query_row(schema::SELECT_MATCH_BY_ID, [id], row_to_match)
                    .map_err(wrap_err)?;

                // Standings move once, when the fixture first reaches full time.
                if status == MatchStatus::Finished && current.status != MatchStatus::Finished {
                    let mut home = tx
                        .query_row(schema::SELECT_TEAM_BY_ID, [current.home_team_id], row_to_team)
                        .map_err(wrap_err)?;
                    let mut away = tx
                        .query_row(schema::SELECT_TEAM_BY_ID, [current.away_team_id], row_to_team)
                        .map_err(wrap_err)?;

                    apply_result(&mut home, &mut away, home_score, away_score);

                    for team in [&home, &away] {
                        tx.execute(
                            schema::APPLY_TEAM_RECORD,
                            rusqlite::params![
                                team.id,
                                team.points,
                                team.matches_played,
                                team.goal_diff
                            ],
                        )
                        .map_err(wrap_err)?;
                    }
                }

                tx.execute(
                    schema::UPDATE_MATCH_RESULT,
                    rusqlite::params![id, home_score, away_score, status_to_string(status)],
                )
                .map_err(wrap_err)?;

                let updated = tx
                    .query_row(schema::SELECT_MATCH_BY_ID, [id], row_to_match)
                    .map_err(wrap_err)?;

                tx.commit().map_err(wrap_err)?;
                Ok(updated)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Match", id.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                match conn.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let label = email.clone();

        self.conn
            .call(move |conn| {
                match conn.query_row(schema::SELECT_USER_BY_EMAIL, [&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", label))
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let mut user = user.clone();
        let label = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        user.name,
                        user.email,
                        user.password_hash,
                        user.role.as_str(),
                        user.favorite_team_id
                    ],
                )
                .map_err(wrap_err)?;
                user.id = conn.last_insert_rowid();
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", label))
    }

    async fn set_favorite_team(&self, user_id: i64, team_id: Option<i64>) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_FAVORITE_TEAM, rusqlite::params![user_id, team_id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_id.to_string()))
    }
}
