use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::error::HubError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/history", get(history))
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, HubError> {
    render(&state, "index.html").await
}

async fn history(State(state): State<Arc<AppState>>) -> Result<Html<String>, HubError> {
    render(&state, "history.html").await
}

/// Pages are static HTML; the data is fetched client-side from `/api/*`.
async fn render(state: &AppState, name: &str) -> Result<Html<String>, HubError> {
    let path = state.config.templates_dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) => {
            tracing::error!("template {}: {e}", path.display());
            Err(HubError::Internal(format!("template unavailable: {name}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::routes::app;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        dir
    }

    async fn fetch(dir: &Path, uri: &str) -> (StatusCode, String) {
        let state = AppState::new(HubConfig {
            bind: "127.0.0.1".to_string(),
            port: 0,
            data_dir: dir.to_path_buf(),
            current_file: "current_positions.csv".to_string(),
            history_file: "positions_history.csv".to_string(),
            templates_dir: dir.join("templates"),
            static_dir: dir.join("static"),
        });
        let resp = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn renders_both_pages() {
        let dir = site_dir();
        std::fs::write(dir.path().join("templates/index.html"), "<h1>Current</h1>").unwrap();
        std::fs::write(dir.path().join("templates/history.html"), "<h1>History</h1>").unwrap();

        let (status, body) = fetch(dir.path(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Current</h1>");

        let (status, body) = fetch(dir.path(), "/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>History</h1>");
    }

    #[tokio::test]
    async fn missing_template_is_server_error() {
        let dir = site_dir();
        let (status, body) = fetch(dir.path(), "/history").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("history.html"));
    }

    #[tokio::test]
    async fn serves_static_assets() {
        let dir = site_dir();
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::write(dir.path().join("static/app.js"), "console.log(1);").unwrap();

        let (status, body) = fetch(dir.path(), "/static/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1);");

        let (status, _) = fetch(dir.path(), "/static/nope.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
