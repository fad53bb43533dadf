//! Stratpulse Server - Strategic performance calculation service
//!
//! Serves the remote invocation endpoint used by the dashboards. Metrics are
//! pushed via structured JSON logs to stdout.
//!
//! # Usage
//! ```sh
//! SERVER_PORT=54321 OBSERVABILITY_INTERVAL=60 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT` - Bind address (default: 127.0.0.1:54321)
//! - `CORS_ORIGINS` - Comma-separated allowed origins
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::Result;
use stratpulse::config::Config;
use stratpulse::infrastructure::observability::{Metrics, MetricsReporter};
use stratpulse::interfaces::http::PerformanceServer;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Stratpulse Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Bind={}:{}, CORS origins={:?}",
        config.server.host, config.server.port, config.server.cors_origins
    );

    let metrics = Metrics::new()?;

    if config.observability.enabled {
        let reporter = MetricsReporter::new(metrics.clone(), config.observability.interval_secs);
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability.interval_secs
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    PerformanceServer::new(config.server, metrics).start().await?;
    info!("Shutdown complete.");

    Ok(())
}
