//! Server instance management

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use crate::config::ServerEnvConfig;
use crate::infrastructure::observability::Metrics;
use crate::interfaces::http::handlers::{AppState, CALCULATE_ROUTE, create_router};

/// HTTP server hosting the calculation endpoint
pub struct PerformanceServer {
    config: ServerEnvConfig,
    metrics: Metrics,
}

impl PerformanceServer {
    pub fn new(config: ServerEnvConfig, metrics: Metrics) -> Self {
        Self { config, metrics }
    }

    /// Binds, serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let app = create_router(AppState::new(self.config, self.metrics));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context(format!("Failed to bind to {}", addr))?;

        info!("Server listening on: http://{}", addr);
        info!("Calculation endpoint: http://{}{}", addr, CALCULATE_ROUTE);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                error!("Failed to install TERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
