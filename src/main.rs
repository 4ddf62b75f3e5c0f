use axum::{
    Router, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use hushgifts::{AppResult, AppState, Markdown, db, groups, include_res, reveal, session::GROUP_ID, store};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, cookie::SameSite};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hushgifts=info")),
        )
        .init();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(2)));

    let db_url = dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:hushgifts.db".to_owned());
    let db_pool = db::connect(&db_url).await.unwrap();

    let app_state = AppState { db_pool };

    let app = Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .nest("/g", groups::router())
        .nest("/m", reveal::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

#[debug_handler]
async fn about() -> impl IntoResponse {
    Markdown(include_res!(str, "/pages/about.md"))
}

#[debug_handler]
async fn index(State(db_pool): State<SqlitePool>, session: Session) -> AppResult<Response> {
    let mut group_link = String::new();
    if let Some(group_id) = session.get::<String>(GROUP_ID).await? {
        if store::lookup_group(&db_pool, &group_id).await?.is_some() {
            group_link =
                include_res!(str, "/pages/group_link.html").replace("{group_id}", &group_id);
        }
    }

    Ok(Html(include_res!(str, "/pages/index.html").replace("{group_link}", &group_link))
        .into_response())
}
