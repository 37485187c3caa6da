use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        admin::{record_result, upsert_player, upsert_team},
        api::{get_table, list_matches, list_players, list_teams, stats},
        auth::{login, logout, register},
        health::{health, ping},
        pages::{
            account_page, analytics_page, auth_page, community_page, feed_page, league_page,
            live_page, profile_page,
        },
        profile::{feed, me, set_favorite},
        threads::{list_threads, post_comment},
        ws::standings_ws,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        // League data
        .route("/table", get(get_table))
        .route("/teams", get(list_teams))
        .route("/players", get(list_players))
        .route("/matches", get(list_matches))
        .route("/stats", get(stats))
        // Community
        .route("/threads", get(list_threads))
        .route("/threads/comment", post(post_comment))
        // Session
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        // Signed-in user
        .route("/profile/favorite", post(set_favorite))
        .route("/profile/me", get(me))
        .route("/feed", get(feed))
        // Admin
        .route("/admin/teams", post(upsert_team))
        .route("/admin/players", post(upsert_player))
        .route("/admin/matches/{id}/result", post(record_result))
        .layer(cors);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(auth_page))
        .route("/auth", get(auth_page))
        .route("/profile", get(profile_page))
        .route("/feed", get(feed_page))
        .route("/live", get(live_page))
        .route("/analytics", get(analytics_page))
        .route("/community", get(community_page))
        .route("/league", get(league_page))
        .route("/account", get(account_page))
        .route("/health", get(health))
        .route("/ping", get(ping))
        .nest("/api", api_routes)
        .nest_service("/static", static_files)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        // Added after the timeout layer: websocket sessions are long-lived.
        .route("/ws/standings", get(standings_ws))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use leaguehub_core::league::Role;
    use tower::ServiceExt;

    use crate::state::test_support::{seeded_state, token_for};
    use crate::worker::Notification;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: serde_json::Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(json.to_string())).unwrap()
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_probes() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::json!({"status": "ok"}));

        let (_, body) = send(&app, get_req("/ping")).await;
        assert_eq!(json(&body), serde_json::json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn test_table_lists_seeded_clubs() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (status, body) = send(&app, get_req("/api/table")).await;
        assert_eq!(status, StatusCode::OK);

        let rows = json(&body);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        for key in ["team_id", "team", "played", "points", "gd"] {
            assert!(rows[0].get(key).is_some(), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_players_filter_and_stats() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (_, body) = send(&app, get_req("/api/players?teamId=1")).await;
        let city = json(&body);
        assert_eq!(city.as_array().unwrap().len(), 3);

        let (_, body) = send(&app, get_req("/api/players?teamId=oops")).await;
        assert_eq!(json(&body).as_array().unwrap().len(), 6);

        let (status, body) = send(&app, get_req("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        let stats = json(&body);
        assert_eq!(stats["topScorers"][0]["player"], "Erling Haaland");
        assert_eq!(stats["topAssisters"][0]["player"], "Kevin De Bruyne");
        assert_eq!(stats["cleanSheets"][0]["player"], "Alisson Becker");
    }

    #[tokio::test]
    async fn test_matches_endpoint() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (status, body) = send(&app, get_req("/api/matches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body).as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_register_login_and_profile() {
        let (state, mut rx) = seeded_state().await;
        let app = create_app(state);

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/register",
                serde_json::json!({
                    "name": "Fan",
                    "email": "Fan@Example.com",
                    "password": "password123",
                    "favoriteTeam": 2
                }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user = json(&body);
        assert_eq!(user["user"]["email"], "fan@example.com");
        assert!(user["user"].get("password_hash").is_none());
        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::UserRegistered {
                user_id: user["user"]["id"].as_i64().unwrap(),
                name: "Fan".to_string()
            }
        );

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({"email": "fan@example.com", "password": "password123"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("auth_token="));
        assert!(cookie.contains("HttpOnly"));

        let session = cookie.split(';').next().unwrap().to_string();
        let request = Request::builder()
            .uri("/api/profile/me")
            .header("Cookie", session.clone())
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let me = json(&body);
        assert_eq!(me["name"], "Fan");
        assert_eq!(me["favorite_team"]["short_name"], "ARS");

        let request = Request::builder()
            .uri("/api/feed")
            .header("Cookie", session)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let feed = json(&body);
        assert_eq!(feed["team"]["name"], "Arsenal");
        assert_eq!(feed["upcoming"].as_array().unwrap().len(), 2);
        assert!(feed["recent"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);
        let payload = serde_json::json!({
            "name": "Fan", "email": "fan@example.com", "password": "password123"
        });

        let (status, _) = send(&app, post_json("/api/auth/register", payload.clone(), None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, post_json("/api/auth/register", payload, None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json(&body)["error"], "email already registered");
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (status, _) = send(
            &app,
            post_json(
                "/api/auth/login",
                serde_json::json!({"email": "nobody@example.com", "password": "password123"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let request = Request::builder()
            .method("POST")
            .uri("/api/threads/comment")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"], "invalid body");
    }

    #[tokio::test]
    async fn test_threads() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (_, body) = send(&app, get_req("/api/threads")).await;
        assert_eq!(json(&body)[0]["title"], "Arsenal vs Chelsea Match Thread");

        let (status, body) = send(
            &app,
            post_json(
                "/api/threads/comment",
                serde_json::json!({"threadId": 1, "user": "fan3", "message": "Offside!"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["comments"].as_array().unwrap().len(), 3);

        let (status, body) = send(
            &app,
            post_json(
                "/api/threads/comment",
                serde_json::json!({"threadId": 42, "user": "fan3", "message": "Hello"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"], "thread not found");
    }

    #[tokio::test]
    async fn test_protected_routes_require_auth() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        let (status, _) = send(&app, get_req("/api/profile/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            post_json("/api/admin/teams", serde_json::json!({"name": "Brentford"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_routes_reject_regular_users() {
        let (state, _rx) = seeded_state().await;
        let (_, token) = token_for(&state, "fan@example.com", Role::User).await;
        let app = create_app(state);

        let (status, _) = send(
            &app,
            post_json(
                "/api/admin/teams",
                serde_json::json!({"name": "Brentford"}),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_result_updates_table_and_pushes_to_subscribers() {
        let (state, mut rx) = seeded_state().await;
        let (_, token) = token_for(&state, "boss@example.com", Role::Admin).await;
        let mut subscription = state
            .broadcaster
            .subscribe(leaguehub_core::league::StandingsMessage::new(vec![]), 0);
        subscription.recv().await.unwrap();
        let app = create_app(state.clone());

        // Warm the cache so the write has something to invalidate.
        send(&app, get_req("/api/table")).await;

        // Fixture 5 is Chelsea (5) vs Tottenham (6).
        let (status, body) = send(
            &app,
            post_json(
                "/api/admin/matches/5/result",
                serde_json::json!({"home": 0, "away": 3, "status": "finished"}),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "finished");

        let pushed = subscription.recv().await.unwrap();
        assert_eq!(pushed.standings[0].team, "Tottenham");
        assert_eq!(pushed.standings[0].points, 3);

        let (_, body) = send(&app, get_req("/api/table")).await;
        let table = json(&body);
        assert_eq!(table[0]["team"], "Tottenham");
        assert_eq!(table[0]["gd"], 3);
        assert_eq!(table[5]["team"], "Chelsea");

        assert!(matches!(
            rx.try_recv().unwrap(),
            Notification::ResultRecorded { match_id: 5, home: 0, away: 3 }
        ));
        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::StandingsPublished { delivered: 1 }
        );
    }

    #[tokio::test]
    async fn test_admin_team_upsert_and_unknown_match() {
        let (state, _rx) = seeded_state().await;
        let (_, token) = token_for(&state, "boss@example.com", Role::Admin).await;
        let app = create_app(state);

        let (status, body) = send(
            &app,
            post_json(
                "/api/admin/teams",
                serde_json::json!({"name": "Brentford", "shortName": "BRE"}),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["id"], 7);

        let (_, body) = send(&app, get_req("/api/table")).await;
        assert_eq!(json(&body).as_array().unwrap().len(), 7);

        let (status, _) = send(
            &app,
            post_json(
                "/api/admin/matches/999/result",
                serde_json::json!({"home": 1, "away": 0, "status": "finished"}),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pages_render() {
        let (state, _rx) = seeded_state().await;
        let app = create_app(state);

        for uri in [
            "/", "/auth", "/profile", "/feed", "/live", "/analytics", "/community", "/account",
        ] {
            let (status, body) = send(&app, get_req(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(String::from_utf8(body).unwrap().contains("LeagueHub"));
        }

        let (status, body) = send(&app, get_req("/league")).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Manchester City"));
        assert!(html.contains("Tottenham"));
    }
}
