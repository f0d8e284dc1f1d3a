use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use depot_server::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting appdepot server...");

    // Load configuration
    let config = depot_common::AppConfig::load().expect("Failed to load configuration");
    tracing::info!(
        root = %config.storage.root.display(),
        catalog = %config.storage.catalog_path.display(),
        overrides = config.storage.allow_overrides,
        "Storage configured"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Build shared state
    let state = Arc::new(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
