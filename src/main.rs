//! Strategic performance CLI
//!
//! Scores a goal/objective request document and prints the response JSON.
//!
//! # Usage
//! ```sh
//! stratpulse --input goals.json
//! stratpulse --input goals.json --endpoint http://127.0.0.1:54321/functions/v1/calculate-strategic-performance
//! cat goals.json | stratpulse --input - --fallback --year 2025
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::sync::Arc;
use stratpulse::application::StrategicPerformanceService;
use stratpulse::config::Config;
use stratpulse::domain::performance::{
    PerformanceRequest, compute_fallback, compute_fallback_for_year,
};
use stratpulse::domain::ports::PerformanceCalculator;
use stratpulse::infrastructure::{LocalPerformanceCalculator, RemotePerformanceCalculator};
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Strategic performance scoring", long_about = None)]
struct Cli {
    /// Request JSON file ({goals, objectives, timeframe}), or `-` for stdin
    #[arg(short, long)]
    input: String,

    /// Calculation endpoint URL (overrides PERFORMANCE_ENDPOINT_URL)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Reference year for in-process scoring (defaults to the current UTC year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Use the degraded calculator only
    #[arg(long)]
    fallback: bool,

    /// Pretty-print the response
    #[arg(short, long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr, stdout carries the response
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let request = read_request(&cli.input)?;

    let response = if cli.fallback {
        info!("Degraded calculation requested");
        match cli.year {
            Some(year) => compute_fallback_for_year(
                &request.goals,
                &request.objectives,
                &request.timeframe,
                year,
            ),
            None => compute_fallback(&request.goals, &request.objectives, &request.timeframe),
        }
    } else {
        let mut client_config = config.client.clone();
        if let Some(endpoint) = cli.endpoint {
            client_config = client_config.with_endpoint(endpoint);
        }

        let primary: Arc<dyn PerformanceCalculator> =
            match RemotePerformanceCalculator::from_config(&client_config) {
                Some(remote) => {
                    info!("Scoring through {}", remote.endpoint_url());
                    Arc::new(remote)
                }
                None => Arc::new(match cli.year {
                    Some(year) => LocalPerformanceCalculator::for_year(year),
                    None => LocalPerformanceCalculator::new(),
                }),
            };

        let mut service = StrategicPerformanceService::new(primary);
        if let Some(year) = cli.year {
            service = service.with_reference_year(year);
        }

        let outcome = service.evaluate(&request).await;
        if let Some(reason) = &outcome.degraded_reason {
            warn!("Degraded result: {}", reason);
        }
        outcome.response
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .context("Failed to serialize response")?;
    println!("{}", output);

    Ok(())
}

fn read_request(input: &str) -> Result<PerformanceRequest> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).context(format!("Failed to read {}", input))?
    };

    serde_json::from_str(&raw).context("Failed to parse request JSON")
}
