pub mod pages;
pub mod positions;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Assemble the page and API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(positions::routes())
        .merge(pages::routes())
}

/// Full application: API, pages, health probe and `/static` assets.
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .merge(routes())
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
