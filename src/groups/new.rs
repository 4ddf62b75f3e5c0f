use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, include_res, matcher, session::GROUP_ID, store};

#[derive(Debug, Deserialize)]
pub(crate) struct NewGroupForm {
    name: String,
    participants: String,
}

fn form_page(error: &str) -> Response {
    Html(include_res!(str, "/pages/new_group.html").replace("{error}", error)).into_response()
}

#[debug_handler]
pub(crate) async fn new_group_page() -> impl IntoResponse {
    form_page("")
}

#[debug_handler]
pub(crate) async fn new_group(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(NewGroupForm { name, participants }): Form<NewGroupForm>,
) -> AppResult<Response> {
    // validation happens before any store work, so a rejected form leaves
    // nothing behind
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Ok(form_page("Please give the group a name."));
    }

    let names = matcher::sanitize_names(participants.lines());
    if names.len() < 2 {
        return Ok(form_page("At least 2 participants are needed."));
    }
    if let Some(duplicate) = matcher::first_duplicate(&names) {
        return Ok(form_page(&format!(
            "\"{duplicate}\" is listed more than once. Make the names distinguishable, or nobody can tell whose code is whose."
        )));
    }

    let assignment = matcher::generate_assignment(&names);
    let group_id = store::create_group(&db_pool, &name, &assignment).await?;
    session.insert(GROUP_ID, group_id.clone()).await?;

    tracing::info!(group = %name, participants = names.len(), "created group {group_id}");

    Ok(Redirect::to(&format!("/g/{group_id}")).into_response())
}
