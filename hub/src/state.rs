use std::sync::Arc;

use crate::config::HubConfig;
use crate::data::loader::{load_table, LoadOptions, PositionTable};
use crate::error::LoadError;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Read-only: every request loads its CSV fresh from disk.
pub struct AppState {
    pub config: HubConfig,
}

impl AppState {
    pub fn new(config: HubConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }

    /// Load `file_name` from the data directory on the blocking pool.
    ///
    /// A panicked worker surfaces as [`LoadError::Generic`].
    pub async fn load(&self, file_name: &str, opts: LoadOptions) -> Result<PositionTable, LoadError> {
        let path = self.config.data_dir.join(file_name);
        let dir = self.config.data_dir.clone();
        let name = file_name.to_string();
        let result = tokio::task::spawn_blocking(move || load_table(&dir, &name, opts))
            .await
            .unwrap_or_else(|e| Err(LoadError::Generic(format!("load task failed: {e}"))));

        match &result {
            Err(e @ (LoadError::NotFound | LoadError::Empty)) => {
                tracing::warn!("{}: {e}", path.display());
            }
            Err(e) => tracing::error!("{}: {e}", path.display()),
            Ok(table) => tracing::debug!(
                "{}: {} rows, {} columns",
                path.display(),
                table.records.len(),
                table.columns.len()
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_for(dir: &std::path::Path) -> Arc<AppState> {
        AppState::new(HubConfig {
            bind: "127.0.0.1".to_string(),
            port: 0,
            data_dir: dir.to_path_buf(),
            current_file: "current_positions.csv".to_string(),
            history_file: "positions_history.csv".to_string(),
            templates_dir: dir.join("templates"),
            static_dir: dir.join("static"),
        })
    }

    #[tokio::test]
    async fn load_reports_each_failure_kind() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        assert_eq!(state.load("absent.csv", LoadOptions::default()).await, Err(LoadError::NotFound));

        std::fs::write(dir.path().join("blank.csv"), "").unwrap();
        assert_eq!(state.load("blank.csv", LoadOptions::default()).await, Err(LoadError::Empty));

        std::fs::create_dir_all(dir.path().join("folder.csv")).unwrap();
        assert!(matches!(
            state.load("folder.csv", LoadOptions::default()).await,
            Err(LoadError::Generic(_))
        ));
    }

    #[tokio::test]
    async fn load_returns_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("positions_history.csv"), "type,profit\nLong,4\n").unwrap();
        let state = state_for(dir.path());

        let table = state
            .load(&state.config.history_file, LoadOptions { coerce_profit: true })
            .await
            .unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].profit, 4.0);
    }
}
