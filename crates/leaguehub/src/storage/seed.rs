//! First-run data: clubs, fixtures, a few players and the administrator.
//!
//! Every step only fires when its table (or the admin row) is missing, so
//! seeding is safe to run on every startup.

use leaguehub_auth::hash_password;
use leaguehub_core::league::{Match, MatchStatus, Player, PlayerStat, Role, Team, User};
use leaguehub_core::storage::{PlayerRepository, TeamRepository, UserRepository};

use super::SqliteRepository;
use crate::config::Config;

const SEASON: &str = "2025/26";
const DAY_SECS: i64 = 86_400;

fn clubs() -> Vec<Team> {
    vec![
        Team::new("Manchester City", "MCI")
            .with_colors("#6CABDD", "#1C2C5B")
            .with_logo("/static/logos/mci.png"),
        Team::new("Arsenal", "ARS")
            .with_colors("#EF0107", "#9C824A")
            .with_logo("/static/logos/ars.png"),
        Team::new("Liverpool", "LIV")
            .with_colors("#C8102E", "#00A398")
            .with_logo("/static/logos/liv.png"),
        Team::new("Manchester United", "MUN")
            .with_colors("#DA291C", "#FBE122")
            .with_logo("/static/logos/mun.png"),
        Team::new("Chelsea", "CHE")
            .with_colors("#034694", "#DBA111")
            .with_logo("/static/logos/che.png"),
        Team::new("Tottenham", "TOT")
            .with_colors("#132257", "#FFFFFF")
            .with_logo("/static/logos/tot.png"),
    ]
}

/// (player, club short name, position, goals, assists, clean sheets)
const SQUAD: &[(&str, &str, &str, i64, i64, i64)] = &[
    ("Erling Haaland", "MCI", "FW", 18, 4, 0),
    ("Mohamed Salah", "LIV", "FW", 15, 9, 0),
    ("Kevin De Bruyne", "MCI", "MF", 5, 12, 0),
    ("Martin Ødegaard", "ARS", "MF", 6, 10, 0),
    ("Alisson Becker", "LIV", "GK", 0, 0, 11),
    ("Ederson", "MCI", "GK", 0, 1, 10),
];

/// Populates an empty database.
pub async fn seed(repo: &SqliteRepository, config: &Config) -> anyhow::Result<()> {
    if repo.team_count().await? == 0 {
        for club in clubs() {
            repo.upsert_team(&club).await?;
        }
        tracing::info!("Seeded clubs");
    }

    let teams = repo.list_teams().await?;

    if repo.match_count().await? == 0 && teams.len() >= 2 {
        let now = chrono::Utc::now().timestamp();
        for (i, pair) in teams.windows(2).enumerate() {
            let fixture = Match {
                id: 0,
                home_team_id: pair[0].id,
                away_team_id: pair[1].id,
                home_team: pair[0].name.clone(),
                away_team: pair[1].name.clone(),
                home_score: None,
                away_score: None,
                date: now + (i as i64 + 1) * DAY_SECS,
                stadium: "Stadium".to_string(),
                status: MatchStatus::Upcoming,
            };
            repo.create_match(&fixture).await?;
        }
        tracing::info!(count = teams.len() - 1, "Seeded fixtures");
    }

    if repo.player_count().await? == 0 {
        let mut seeded = 0;
        for &(name, club, position, goals, assists, clean_sheets) in SQUAD {
            let Some(team) = teams.iter().find(|t| t.short_name == club) else {
                continue;
            };
            let player = repo
                .upsert_player(&Player {
                    id: 0,
                    name: name.to_string(),
                    team_id: team.id,
                    position: position.to_string(),
                    stats: Vec::new(),
                })
                .await?;
            repo.upsert_player_stat(&PlayerStat {
                id: 0,
                player_id: player.id,
                season: SEASON.to_string(),
                goals,
                assists,
                clean_sheets,
                minutes_played: 0,
            })
            .await?;
            seeded += 1;
        }
        tracing::info!(count = seeded, "Seeded players");
    }

    if let Some(password) = &config.admin_password {
        let email = config.admin_email.trim().to_lowercase();
        if repo.get_user_by_email(&email).await?.is_none() {
            let hash = hash_password(password)?;
            repo.create_user(&User::new("Admin", email.as_str(), hash).with_role(Role::Admin))
                .await?;
            tracing::info!(email = %email, "Seeded administrator");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use leaguehub_core::storage::MatchRepository;

    use super::*;

    fn config(admin_password: Option<&str>) -> Config {
        Config {
            admin_password: admin_password.map(str::to_string),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_seeds_clubs_fixtures_and_players() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        seed(&repo, &config(None)).await.unwrap();

        let teams = repo.list_teams().await.unwrap();
        assert_eq!(teams.len(), 6);
        assert_eq!(teams[0].short_name, "MCI");
        assert_eq!(teams[5].logo_url, "/static/logos/tot.png");

        let matches = repo.list_matches().await.unwrap();
        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|m| m.status == MatchStatus::Upcoming));
        assert_eq!(matches[0].home_team, "Manchester City");
        assert_eq!(matches[0].away_team, "Arsenal");
        assert_eq!(matches[1].date - matches[0].date, DAY_SECS);

        let players = repo.list_players(None).await.unwrap();
        assert_eq!(players.len(), SQUAD.len());
        assert!(players.iter().all(|p| p.stats.len() == 1));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        seed(&repo, &config(Some("change-me"))).await.unwrap();
        seed(&repo, &config(Some("change-me"))).await.unwrap();

        assert_eq!(repo.team_count().await.unwrap(), 6);
        assert_eq!(repo.match_count().await.unwrap(), 5);
        assert_eq!(repo.player_count().await.unwrap(), SQUAD.len() as i64);
    }

    #[tokio::test]
    async fn test_admin_only_seeded_with_password() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        seed(&repo, &config(None)).await.unwrap();
        assert!(repo
            .get_user_by_email("admin@epl.local")
            .await
            .unwrap()
            .is_none());

        seed(&repo, &config(Some("change-me"))).await.unwrap();
        let admin = repo
            .get_user_by_email("admin@epl.local")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(leaguehub_auth::verify_password("change-me", &admin.password_hash));
    }
}
