use anyhow::{Context, Result};
use clinic_core::Database;
use clinic_server::{app, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("Failed to load server configuration")?;

    let db = Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database at {}", config.db_path))?;
    let state = AppState::new(db);

    let addr = config.addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("clinic records API listening on {addr}");

    axum::serve(listener, app(state, &config.static_dir))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("Server failed")?;

    Ok(())
}
