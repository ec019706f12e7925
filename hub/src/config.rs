use std::env;
use std::path::PathBuf;

/// Hub configuration derived from environment variables.
///
/// Built once at startup and shared read-only with every handler.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,

    // ── CSV sources ────────────────────────────────────────────────
    pub data_dir: PathBuf,
    pub current_file: String,
    pub history_file: String,

    // ── Pages ──────────────────────────────────────────────────────
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env_str(name, default))
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("POSITIONS_HUB_BIND", "0.0.0.0"),
            port: env_u16("POSITIONS_HUB_PORT", 5000),
            data_dir: env_path("POSITIONS_HUB_DATA_DIR", "/HDD"),
            current_file: env_str("POSITIONS_HUB_CURRENT_FILE", "current_positions.csv"),
            history_file: env_str("POSITIONS_HUB_HISTORY_FILE", "positions_history.csv"),
            templates_dir: env_path("POSITIONS_HUB_TEMPLATES_DIR", "hub/templates"),
            static_dir: env_path("POSITIONS_HUB_STATIC_DIR", "hub/static"),
        }
    }

    /// Full path of the positions history CSV.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }
}
