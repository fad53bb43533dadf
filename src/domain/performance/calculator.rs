use super::classification::{
    ProgressBand, breakdown, objective_alignment, percentage, round_score, year_end_goals,
};
use super::types::{Breakdown, CURRENT_YEAR_TIMEFRAME, ConfidenceInterval, PerformanceResponse};
use crate::domain::goals::{Goal, Objective};
use chrono::{Datelike, Utc};
use tracing::debug;

/// Share of behind goals above which confidence is penalized.
pub const BEHIND_RATIO_LIMIT: f64 = 0.3;
/// Share of at-risk goals above which confidence is penalized.
pub const AT_RISK_RATIO_LIMIT: f64 = 0.4;
/// Alignment score below which a risk factor is raised.
pub const ALIGNMENT_RISK_THRESHOLD: u32 = 60;
/// Alignment score below which an alignment recommendation is made.
pub const ALIGNMENT_RECOMMENDATION_THRESHOLD: u32 = 70;

const BEHIND_PENALTY: f64 = 0.85;
const AT_RISK_PENALTY: f64 = 0.9;
const ALIGNMENT_PENALTY: f64 = 0.9;
const BASE_CONFIDENCE_RANGE: f64 = 10.0;

pub const NO_TARGETS_RISK: &str = "No strategic targets set for current year";
pub const NO_TARGETS_RECOMMENDATION: &str = "Set strategic goals with clear deadlines";
pub const LOW_ALIGNMENT_RISK: &str =
    "Low strategic alignment - many goals not linked to objectives";
pub const ALIGNMENT_RECOMMENDATION: &str =
    "Improve goal-objective alignment through the alignment matrix";
pub const REVIEW_RECOMMENDATION: &str =
    "High-priority review needed - more goals at risk than on track";
pub const WELL_POSITIONED_RECOMMENDATION: &str = "Strategic targets appear well-positioned";

/// Scores the likelihood of meeting this year's goals, using the current UTC year.
pub fn compute(goals: &[Goal], objectives: &[Objective], timeframe: &str) -> PerformanceResponse {
    compute_for_year(goals, objectives, timeframe, Utc::now().year())
}

/// Same as [`compute`] with the reference year pinned.
pub fn compute_for_year(
    goals: &[Goal],
    objectives: &[Objective],
    timeframe: &str,
    year: i32,
) -> PerformanceResponse {
    if timeframe != CURRENT_YEAR_TIMEFRAME {
        debug!(
            "Timeframe '{}' has no dedicated rules, evaluating as {}",
            timeframe, CURRENT_YEAR_TIMEFRAME
        );
    }
    debug!(
        "Scoring {} goals and {} objectives for {}",
        goals.len(),
        objectives.len(),
        year
    );

    let year_end = year_end_goals(goals, year);
    let alignment = objective_alignment(goals);

    if year_end.is_empty() {
        return PerformanceResponse {
            strategic_likelihood: 0,
            risk_factors: vec![NO_TARGETS_RISK.to_string()],
            confidence_interval: ConfidenceInterval(0, 0),
            recommendations: vec![NO_TARGETS_RECOMMENDATION.to_string()],
            breakdown: Breakdown::default(),
            objective_alignment: alignment,
        };
    }

    let counts = breakdown(&year_end);
    let base_score = weighted_base_score(&year_end);

    let mut confidence_modifier = 1.0;
    let mut risk_factors = Vec::new();

    let behind_ratio = counts.behind as f64 / counts.total as f64;
    if behind_ratio > BEHIND_RATIO_LIMIT {
        risk_factors.push(format!(
            "{}% of goals are significantly behind",
            percentage(counts.behind, counts.total)
        ));
        confidence_modifier *= BEHIND_PENALTY;
    }

    let at_risk_ratio = counts.at_risk as f64 / counts.total as f64;
    if at_risk_ratio > AT_RISK_RATIO_LIMIT {
        risk_factors.push(format!(
            "{}% of goals are at risk",
            percentage(counts.at_risk, counts.total)
        ));
        confidence_modifier *= AT_RISK_PENALTY;
    }

    if alignment.score < ALIGNMENT_RISK_THRESHOLD {
        risk_factors.push(LOW_ALIGNMENT_RISK.to_string());
        confidence_modifier *= ALIGNMENT_PENALTY;
    }

    let final_score = round_score(base_score * confidence_modifier);
    let confidence_range = round_score(BASE_CONFIDENCE_RANGE / confidence_modifier);

    let recommendations = recommendations(&counts, alignment.score);

    debug!(
        "Base score {:.2}, confidence modifier {:.4}, final {}",
        base_score, confidence_modifier, final_score
    );

    PerformanceResponse {
        strategic_likelihood: final_score,
        risk_factors,
        confidence_interval: ConfidenceInterval::around(final_score, confidence_range),
        recommendations,
        breakdown: counts,
        objective_alignment: alignment,
    }
}

/// Priority-weighted mean of band scores, as a percentage.
fn weighted_base_score(year_end: &[&Goal]) -> f64 {
    let (weighted_sum, total_weight) = year_end.iter().fold((0.0, 0.0), |(sum, total), goal| {
        let weight = goal.priority().weight();
        let score = ProgressBand::of(goal.progress_percentage).score();
        (sum + score * weight, total + weight)
    });

    if total_weight > 0.0 {
        weighted_sum / total_weight * 100.0
    } else {
        0.0
    }
}

fn recommendations(counts: &Breakdown, alignment_score: u32) -> Vec<String> {
    let mut recommendations = Vec::new();
    if counts.behind > 0 {
        recommendations.push(format!(
            "Focus on {} behind goals - consider resource reallocation",
            counts.behind
        ));
    }
    if alignment_score < ALIGNMENT_RECOMMENDATION_THRESHOLD {
        recommendations.push(ALIGNMENT_RECOMMENDATION.to_string());
    }
    if counts.at_risk > counts.on_track {
        recommendations.push(REVIEW_RECOMMENDATION.to_string());
    }
    if recommendations.is_empty() {
        recommendations.push(WELL_POSITIONED_RECOMMENDATION.to_string());
    }
    recommendations
}
