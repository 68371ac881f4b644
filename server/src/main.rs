//! Courtside server: NBA statistics proxy with cached AI player analyses

use clap::Parser;
use courtside_core::CoreError;
use courtside_http::HttpServer;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;

use cli::Cli;
use config::CourtsideConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = match CourtsideConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(&args);

    if let Err(e) = run(config).await {
        error!("Courtside failed: {}", e);
        process::exit(1);
    }
}

async fn run(config: CourtsideConfig) -> Result<(), CoreError> {
    let state = app::build_state(&config)?;
    let server = HttpServer::new(config.http());

    info!("Starting Courtside on {}", server.config().bind_address);

    server
        .serve(state, shutdown_signal())
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
