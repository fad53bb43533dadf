//! Push-based metrics reporter for stratpulse
//!
//! Periodically outputs a metrics snapshot as structured JSON to stdout.

use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const SOURCES: [&str; 4] = ["primary", "fallback", "cached", "local"];

/// One `METRICS_JSON:` line.
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub calculations: CalculationSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CalculationSnapshot {
    pub primary: u64,
    pub fallback: u64,
    pub cached: u64,
    pub local: u64,
    pub last_strategic_likelihood: u32,
}

/// Prints calculation counters on a fixed interval.
pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    /// Intervals below one second are raised to one second.
    pub fn new(metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Never returns; spawn it on its own task.
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Calculations: primary {} | fallback {} | cached {} | local {} | Uptime: {}s",
                        snapshot.calculations.primary,
                        snapshot.calculations.fallback,
                        snapshot.calculations.cached,
                        snapshot.calculations.local,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        let [primary, fallback, cached, local] =
            SOURCES.map(|s| self.metrics.calculations(s) as u64);

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            calculations: CalculationSnapshot {
                primary,
                fallback,
                cached,
                local,
                last_strategic_likelihood: self.metrics.last_strategic_likelihood.get() as u32,
            },
        }
    }
}
