//! Prometheus metrics definitions for stratpulse
//!
//! All metrics use the `stratpulse_` prefix.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the calculation service and its clients
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Evaluations by the source that produced the answer
    pub calculations_total: CounterVec,
    /// Degraded evaluations by failure kind
    pub fallbacks_total: CounterVec,
    /// Endpoint requests by route and status code
    pub http_requests_total: CounterVec,
    /// Remote calculation latency in seconds
    pub remote_latency_seconds: HistogramVec,
    /// Most recent strategic likelihood produced
    pub last_strategic_likelihood: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let calculations_total = CounterVec::new(
            Opts::new(
                "stratpulse_calculations_total",
                "Strategic performance evaluations by source",
            ),
            &["source"],
        )?;
        registry.register(Box::new(calculations_total.clone()))?;

        let fallbacks_total = CounterVec::new(
            Opts::new(
                "stratpulse_fallbacks_total",
                "Evaluations answered by the degraded calculator, by failure kind",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(fallbacks_total.clone()))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "stratpulse_http_requests_total",
                "Calculation endpoint requests by route and status",
            ),
            &["route", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let remote_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "stratpulse_remote_latency_seconds",
                "Remote calculation latency in seconds",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(remote_latency_seconds.clone()))?;

        let last_strategic_likelihood = Gauge::with_opts(Opts::new(
            "stratpulse_last_strategic_likelihood",
            "Most recent strategic likelihood (0-100)",
        ))?;
        registry.register(Box::new(last_strategic_likelihood.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "stratpulse_uptime_seconds",
            "Process uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            calculations_total,
            fallbacks_total,
            http_requests_total,
            remote_latency_seconds,
            last_strategic_likelihood,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    /// Record an evaluation and the likelihood it produced
    pub fn record_calculation(&self, source: &str, likelihood: u32) {
        self.calculations_total.with_label_values(&[source]).inc();
        self.last_strategic_likelihood.set(f64::from(likelihood));
    }

    pub fn inc_fallback(&self, reason: &str) {
        self.fallbacks_total.with_label_values(&[reason]).inc();
    }

    pub fn inc_http_request(&self, route: &str, status: u16) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[route, status.as_str()])
            .inc();
    }

    pub fn observe_remote_latency(&self, outcome: &str, latency: f64) {
        self.remote_latency_seconds
            .with_label_values(&[outcome])
            .observe(latency);
    }

    /// Current value of the evaluation counter for `source`
    pub fn calculations(&self, source: &str) -> f64 {
        self.calculations_total.with_label_values(&[source]).get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_calculation("primary", 72);

        let output = metrics.render();
        assert!(output.contains("stratpulse_calculations_total"));
        assert!(output.contains("stratpulse_last_strategic_likelihood 72"));
    }

    #[test]
    fn test_fallback_counter_by_reason() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_fallback("transport");
        metrics.inc_fallback("transport");
        metrics.inc_fallback("status");

        let transport = metrics.fallbacks_total.with_label_values(&["transport"]).get();
        assert!((transport - 2.0).abs() < f64::EPSILON);
        assert!(metrics.calculations("primary").abs() < f64::EPSILON);
    }

    #[test]
    fn test_http_request_counter_labels() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_http_request("calculate", 400);
        assert!(metrics.render().contains("status=\"400\""));
    }
}
