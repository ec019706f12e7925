use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::data::loader::{records_or_empty, LoadOptions, PositionRecord};
use crate::data::stats::stats_or_default;
use crate::error::HubError;
use crate::state::AppState;

const HISTORY_OPTS: LoadOptions = LoadOptions { coerce_profit: true };

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/current_positions", get(api_current_positions))
        .route("/api/positions_history", get(api_positions_history))
        .route("/api/history_stats", get(api_history_stats))
        .route("/download/history", get(download_history))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// GET /api/current_positions — every row of the current positions file.
async fn api_current_positions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PositionRecord>>, HubError> {
    let table = state
        .load(&state.config.current_file, LoadOptions::default())
        .await?;
    Ok(Json(table.records))
}

/// GET /api/positions_history — history rows with `profit` coerced; `[]` when
/// the file is missing or empty.
async fn api_positions_history(State(state): State<Arc<AppState>>) -> Response {
    let result = records_or_empty(state.load(&state.config.history_file, HISTORY_OPTS).await);

    match result {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!("Failed to load history data: {e}");
            fixed_error("Failed to load history data")
        }
    }
}

/// GET /api/history_stats — aggregate counts over the history file; all zero
/// when the file is missing or empty.
async fn api_history_stats(State(state): State<Arc<AppState>>) -> Response {
    let result = stats_or_default(state.load(&state.config.history_file, HISTORY_OPTS).await);

    match result {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            tracing::error!("Failed to calculate statistics: {e}");
            fixed_error("Failed to calculate statistics")
        }
    }
}

/// GET /download/history — the raw history CSV as an attachment.
async fn download_history(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HubError> {
    let path = state.config.history_path();
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!("download {}: {e}", path.display());
        HubError::from(e)
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().replace('"', ""))
        .unwrap_or_else(|| "positions_history.csv".to_string());
    let disposition = format!("attachment; filename=\"{file_name}\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// 500 with a fixed message; details stay in the log.
fn fixed_error(msg: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": msg })),
    )
        .into_response()
}
