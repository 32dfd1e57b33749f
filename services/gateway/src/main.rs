mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod router;
mod state;

#[cfg(test)]
mod tests;

use clap::Parser;
use config::GatewayConfig;
use market_data::BourseAdapter;
use router::create_router;
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = GatewayConfig::parse();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(upstream = %config.upstream_base_url, "Starting Bourse gateway");

    let adapter = BourseAdapter::new(config.upstream())?;
    let state = AppState::new(Arc::new(adapter));

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Listening on {}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
