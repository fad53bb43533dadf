// Strategic performance scoring
pub mod calculator;
pub mod classification;
pub mod fallback;
pub mod types;

pub use calculator::{compute, compute_for_year};
pub use fallback::{compute_fallback, compute_fallback_for_year};
pub use types::{
    Breakdown, ConfidenceInterval, ObjectiveAlignment, PerformanceRequest, PerformanceResponse,
    CURRENT_YEAR_TIMEFRAME,
};
