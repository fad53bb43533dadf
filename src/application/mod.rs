// Remote-first strategic performance evaluation with degraded fallback
pub mod performance_service;

pub use performance_service::{CalculationSource, PerformanceOutcome, StrategicPerformanceService};
