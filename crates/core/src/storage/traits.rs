use async_trait::async_trait;

use crate::league::{Match, MatchStatus, Player, Team, User};

use super::Result;

/// Repository for team operations.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Lists all teams in storage order.
    async fn list_teams(&self) -> Result<Vec<Team>>;

    /// Lists all teams ordered by points descending, then goal difference
    /// descending. Ties beyond those keys come back in a stable,
    /// store-defined order.
    async fn list_teams_by_standing(&self) -> Result<Vec<Team>>;

    /// Gets a team by its ID.
    async fn get_team(&self, id: i64) -> Result<Option<Team>>;

    /// Inserts a team (id 0) or replaces an existing one. Returns the stored team.
    async fn upsert_team(&self, team: &Team) -> Result<Team>;
}

/// Repository for player operations.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Lists players with their stats, optionally restricted to one team.
    async fn list_players(&self, team_id: Option<i64>) -> Result<Vec<Player>>;

    /// Inserts a player (id 0) or replaces an existing one. Returns the stored player.
    async fn upsert_player(&self, player: &Player) -> Result<Player>;
}

/// Repository for fixture operations.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Lists all fixtures with team names, ordered by kick-off.
    async fn list_matches(&self) -> Result<Vec<Match>>;

    /// Lists fixtures involving a team, ordered by kick-off.
    async fn list_matches_for_team(&self, team_id: i64) -> Result<Vec<Match>>;

    /// Records a score and status for a fixture.
    ///
    /// When the fixture moves into `Finished` for the first time the result
    /// is applied to both teams' standings counters atomically with the
    /// fixture update. Returns the updated fixture.
    async fn record_result(
        &self,
        id: i64,
        home_score: i64,
        away_score: i64,
        status: MatchStatus,
    ) -> Result<Match>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by their (lowercased) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user. Returns the stored user with its assigned ID.
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Sets or clears the user's favorite team.
    async fn set_favorite_team(&self, user_id: i64, team_id: Option<i64>) -> Result<()>;
}
