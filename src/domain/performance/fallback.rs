//! Degraded scoring used when the primary calculator cannot be reached.
//!
//! Shares the year filter, progress bands and alignment with the canonical
//! calculator but ignores priority weights, applies no confidence penalties and
//! emits placeholder risk/recommendation text. Its numbers are not expected to
//! match the canonical output.

use super::classification::{
    ProgressBand, breakdown, objective_alignment, round_score, year_end_goals,
};
use super::types::{ConfidenceInterval, PerformanceResponse};
use crate::domain::goals::{Goal, Objective};
use chrono::{Datelike, Utc};
use tracing::debug;

/// Likelihood below which the degraded result carries a warning.
pub const FALLBACK_WARNING_THRESHOLD: u32 = 60;
const FALLBACK_CONFIDENCE_RANGE: u32 = 10;

pub const FALLBACK_RISK: &str = "Basic calculation - enhanced analysis unavailable";
pub const FALLBACK_RECOMMENDATION: &str =
    "Enhanced recommendations require the strategic performance service";

pub fn compute_fallback(
    goals: &[Goal],
    objectives: &[Objective],
    timeframe: &str,
) -> PerformanceResponse {
    compute_fallback_for_year(goals, objectives, timeframe, Utc::now().year())
}

pub fn compute_fallback_for_year(
    goals: &[Goal],
    objectives: &[Objective],
    timeframe: &str,
    year: i32,
) -> PerformanceResponse {
    debug!(
        "Degraded scoring of {} goals, {} objectives ({}, {})",
        goals.len(),
        objectives.len(),
        timeframe,
        year
    );

    let year_end = year_end_goals(goals, year);
    let counts = breakdown(&year_end);

    let strategic_likelihood = if counts.total > 0 {
        let sum = counts.on_track as f64 * ProgressBand::OnTrack.score()
            + counts.at_risk as f64 * ProgressBand::AtRisk.score()
            + counts.behind as f64 * ProgressBand::Behind.score();
        round_score(sum / counts.total as f64 * 100.0)
    } else {
        0
    };

    let risk_factors = if strategic_likelihood < FALLBACK_WARNING_THRESHOLD {
        vec![FALLBACK_RISK.to_string()]
    } else {
        Vec::new()
    };

    PerformanceResponse {
        strategic_likelihood,
        risk_factors,
        confidence_interval: ConfidenceInterval::around(
            strategic_likelihood,
            FALLBACK_CONFIDENCE_RANGE,
        ),
        recommendations: vec![FALLBACK_RECOMMENDATION.to_string()],
        breakdown: counts,
        objective_alignment: objective_alignment(goals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unweighted_likelihood() {
        let goals = vec![
            Goal::new("a", "", 45.0)
                .with_due_date("2025-12-31")
                .with_priority("high"),
            Goal::new("b", "", 25.0).with_due_date("2025-06-30"),
        ];
        // (0.6 + 0.2) / 2 = 40
        let response = compute_fallback_for_year(&goals, &[], "current_year", 2025);

        assert_eq!(response.strategic_likelihood, 40);
        assert_eq!(response.risk_factors, vec![FALLBACK_RISK]);
        assert_eq!(response.confidence_interval, ConfidenceInterval(30, 50));
        assert_eq!(response.recommendations, vec![FALLBACK_RECOMMENDATION]);
        assert_eq!(response.breakdown.at_risk, 1);
        assert_eq!(response.breakdown.behind, 1);
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_no_warning_above_threshold() {
        let goals = vec![Goal::new("a", "", 95.0).with_due_date("2025-01-15")];
        let response = compute_fallback_for_year(&goals, &[], "current_year", 2025);

        assert_eq!(response.strategic_likelihood, 100);
        assert!(response.risk_factors.is_empty());
        assert_eq!(response.confidence_interval, ConfidenceInterval(90, 100));
    }

    #[test]
    fn test_empty_year_scores_zero() {
        let response = compute_fallback_for_year(&[], &[], "current_year", 2025);
        assert_eq!(response.strategic_likelihood, 0);
        assert_eq!(response.confidence_interval, ConfidenceInterval(0, 10));
        assert_eq!(response.objective_alignment.score, 100);
        assert!(response.validate().is_ok());
    }
}
