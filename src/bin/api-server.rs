//! Momentix API Server
//!
//! HTTP API for index listings, momentum screening and portfolio
//! simulation. Stateless; every request fetches fresh market data.

use dotenvy::dotenv;
use momentix::config::Config;
use momentix::core::http::start_server;
use momentix::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment)?;

    info!("Starting Momentix API Server");
    info!(environment = %config.environment, "Environment");
    info!(
        return_formula = %config.screener.return_formula,
        top_n = config.screener.top_n,
        concurrency = config.screener.concurrency,
        "Screener defaults"
    );
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
