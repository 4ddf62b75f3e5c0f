use axum::{
    Form, Router, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{AppResult, AppState, include_res, res, store};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(reveal_page).post(reveal))
}

fn form_page(error: &str) -> Response {
    Html(include_res!(str, "/pages/reveal.html").replace("{error}", error)).into_response()
}

#[debug_handler]
pub(crate) async fn reveal_page() -> impl IntoResponse {
    form_page("")
}

#[derive(Debug, Deserialize)]
pub(crate) struct RevealForm {
    code: String,
}

#[debug_handler]
pub(crate) async fn reveal(
    State(db_pool): State<SqlitePool>,

    Form(RevealForm { code }): Form<RevealForm>,
) -> AppResult<Response> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(form_page("Please enter your code."));
    }

    let Some(record) = store::lookup_match(&db_pool, code).await? else {
        tracing::debug!("code lookup missed");
        return res::sorry("code");
    };

    Ok(Html(
        include_res!(str, "/pages/match.html")
            .replace("{group_name}", &record.group_name)
            .replace("{giver}", &record.giver)
            .replace("{receiver}", &record.receiver),
    )
    .into_response())
}
