use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use leaguehub_core::league::TableRow;

use crate::{handlers::AppError, state::AppState};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "auth.html")]
struct AuthTemplate;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate;

#[derive(Template)]
#[template(path = "feed.html")]
struct FeedTemplate;

#[derive(Template)]
#[template(path = "live.html")]
struct LiveTemplate;

#[derive(Template)]
#[template(path = "analytics.html")]
struct AnalyticsTemplate;

#[derive(Template)]
#[template(path = "community.html")]
struct CommunityTemplate;

/// Server-rendered table; the live page keeps itself current over websocket.
#[derive(Template)]
#[template(path = "league.html")]
struct LeagueTemplate {
    rows: Vec<TableRow>,
}

#[derive(Template)]
#[template(path = "account.html")]
struct AccountTemplate;

/// Sign-in page, also served at `/`.
pub async fn auth_page() -> impl IntoResponse {
    HtmlTemplate(AuthTemplate)
}

pub async fn profile_page() -> impl IntoResponse {
    HtmlTemplate(ProfileTemplate)
}

// Pages below need a session; the browser script redirects to /auth when
// the API answers 401.

pub async fn feed_page() -> impl IntoResponse {
    HtmlTemplate(FeedTemplate)
}

pub async fn live_page() -> impl IntoResponse {
    HtmlTemplate(LiveTemplate)
}

pub async fn analytics_page() -> impl IntoResponse {
    HtmlTemplate(AnalyticsTemplate)
}

pub async fn community_page() -> impl IntoResponse {
    HtmlTemplate(CommunityTemplate)
}

pub async fn league_page(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.table.compute().await?;
    Ok(HtmlTemplate(LeagueTemplate { rows }))
}

pub async fn account_page() -> impl IntoResponse {
    HtmlTemplate(AccountTemplate)
}
