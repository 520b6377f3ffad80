pub mod api;
pub mod dashboard;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::models::Config;
use crate::roster::RosterStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) roster: Arc<RosterStore>,
    pub(crate) school: Arc<str>,
}

pub(crate) fn router(state: AppState) -> Router {
    let no_store = || SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Router::new()
        .route("/", get(dashboard::dashboard_handler).layer(no_store()))
        .route("/activities", get(api::list_handler).layer(no_store()))
        .route("/activities/{activity}/signup", post(api::signup_handler))
        .route(
            "/activities/{activity}/participants",
            delete(api::unregister_handler),
        )
        .with_state(state)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let roster = RosterStore::from_config(&config);
    info!("Loaded {} activities", roster.len());

    let state = AppState {
        roster: Arc::new(roster),
        school: Arc::from(config.server.school.as_str()),
    };
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Activities service listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
