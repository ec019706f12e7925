mod config;
mod data;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use config::HubConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = HubConfig::from_env();
    let addr: SocketAddr = format!("{}:{}", cfg.bind, cfg.port).parse()?;
    let data_dir = cfg.data_dir.clone();

    let app = routes::app(AppState::new(cfg));

    tracing::info!("Positions hub listening on http://{addr} (data dir {})", data_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
