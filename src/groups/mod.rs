mod group;
mod new;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(new::new_group_page).post(new::new_group))
        .route("/{group_id}", get(group::group))
}
