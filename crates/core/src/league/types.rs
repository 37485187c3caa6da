use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A club competing in the league.
///
/// `points`, `matches_played` and `goal_diff` are the persisted standings
/// counters; the league table is derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub points: i64,
    pub matches_played: i64,
    pub goal_diff: i64,
}

impl Team {
    /// Creates a team with zeroed standings counters.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            short_name: short_name.into(),
            logo_url: String::new(),
            primary_color: String::new(),
            secondary_color: String::new(),
            points: 0,
            matches_played: 0,
            goal_diff: 0,
        }
    }

    /// Sets a specific ID for this team (useful for testing).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the club colors.
    pub fn with_colors(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_color = primary.into();
        self.secondary_color = secondary.into();
        self
    }

    /// Sets the crest URL.
    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    /// Sets the standings counters.
    pub fn with_record(mut self, played: i64, points: i64, goal_diff: i64) -> Self {
        self.matches_played = played;
        self.points = points;
        self.goal_diff = goal_diff;
        self
    }
}

/// Per-season statistics line for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub id: i64,
    pub player_id: i64,
    pub season: String,
    pub goals: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub minutes_played: i64,
}

/// A squad member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team_id: i64,
    pub position: String,
    #[serde(default)]
    pub stats: Vec<PlayerStat>,
}

/// Lifecycle of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "live" => Ok(Self::Live),
            "finished" => Ok(Self::Finished),
            other => Err(format!("unknown match status: {other}")),
        }
    }
}

/// A fixture between two clubs.
///
/// `date` is a unix timestamp in seconds. Scores are absent until the match
/// has kicked off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub date: i64,
    pub stadium: String,
    pub status: MatchStatus,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered site user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub favorite_team_id: Option<i64>,
}

impl User {
    /// Creates a regular user; the ID is assigned by storage.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            favorite_team_id: None,
        }
    }

    /// Promotes the user to administrator.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One line of the league table.
///
/// A snapshot value: it never tracks later changes to the team it was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub team_id: i64,
    pub team: String,
    pub played: i64,
    pub points: i64,
    pub gd: i64,
}

impl From<&Team> for TableRow {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team: team.name.clone(),
            played: team.matches_played,
            points: team.points,
            gd: team.goal_diff,
        }
    }
}

/// Payload pushed to live-standings subscribers: `{"standings": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsMessage {
    pub standings: Vec<TableRow>,
}

impl StandingsMessage {
    pub fn new(standings: Vec<TableRow>) -> Self {
        Self { standings }
    }
}
