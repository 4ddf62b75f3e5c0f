use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, include_res, res, session::GROUP_ID, store};

#[debug_handler]
pub(crate) async fn group(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(group_id): Path<String>,
) -> AppResult<Response> {
    let sorry = res::sorry("group");

    // only the session that created the group gets its codes back
    if session.get::<String>(GROUP_ID).await?.as_deref() != Some(group_id.as_str()) {
        return sorry;
    }

    let Some(summary) = store::lookup_group(&db_pool, &group_id).await? else {
        return sorry;
    };

    let mut rows = String::new();
    for slip in &summary.matches {
        rows += &include_res!(str, "/pages/code_item.html")
            .replace("{giver}", &slip.giver)
            .replace("{code}", &slip.code);
    }

    Ok(Html(
        include_res!(str, "/pages/group.html")
            .replace("{name}", &summary.name)
            .replace("{created}", &summary.created)
            .replace("{rows}", &rows),
    )
    .into_response())
}
