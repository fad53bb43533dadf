//! Push-based observability for stratpulse
//!
//! Metrics are kept in a prometheus registry and pushed as structured JSON
//! log lines on an interval. There is no scrape endpoint.

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::MetricsReporter;
