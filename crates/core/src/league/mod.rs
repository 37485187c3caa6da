mod requests;
mod standings;
mod stats;
mod types;

pub use requests::{MatchResultRequest, UpsertPlayerRequest, UpsertTeamRequest};
pub use standings::{apply_result, sort_standings, table_rows, MatchOutcome};
pub use stats::{ranked_stats, LeaderboardEntry, StatMetric};
pub use types::{
    Match, MatchStatus, Player, PlayerStat, Role, StandingsMessage, TableRow, Team, User,
};
