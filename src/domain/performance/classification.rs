//! Goal classification shared by the canonical and the degraded calculators.

use super::types::{Breakdown, ObjectiveAlignment};
use crate::domain::goals::Goal;
use chrono::Datelike;

pub const ON_TRACK_THRESHOLD: f64 = 70.0;
pub const AT_RISK_THRESHOLD: f64 = 40.0;

/// Progress band of a single goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    OnTrack,
    AtRisk,
    Behind,
}

impl ProgressBand {
    pub fn of(progress_percentage: f64) -> Self {
        if progress_percentage >= ON_TRACK_THRESHOLD {
            ProgressBand::OnTrack
        } else if progress_percentage >= AT_RISK_THRESHOLD {
            ProgressBand::AtRisk
        } else {
            ProgressBand::Behind
        }
    }

    /// Contribution of a goal in this band to the likelihood, before weighting.
    pub fn score(self) -> f64 {
        match self {
            ProgressBand::OnTrack => 1.0,
            ProgressBand::AtRisk => 0.6,
            ProgressBand::Behind => 0.2,
        }
    }
}

/// Goals whose deadline falls in `year`. Missing or unparseable deadlines are dropped.
pub fn year_end_goals(goals: &[Goal], year: i32) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| g.due_date().is_some_and(|d| d.year() == year))
        .collect()
}

pub fn breakdown(year_end: &[&Goal]) -> Breakdown {
    let mut counts = Breakdown {
        total: year_end.len(),
        ..Default::default()
    };
    for goal in year_end {
        match ProgressBand::of(goal.progress_percentage) {
            ProgressBand::OnTrack => counts.on_track += 1,
            ProgressBand::AtRisk => counts.at_risk += 1,
            ProgressBand::Behind => counts.behind += 1,
        }
    }
    counts
}

/// Alignment over every goal, not only those due this year.
/// An empty goal set is fully aligned.
pub fn objective_alignment(goals: &[Goal]) -> ObjectiveAlignment {
    let aligned = goals.iter().filter(|g| g.is_aligned()).count();
    let score = if goals.is_empty() {
        100
    } else {
        percentage(aligned, goals.len())
    };

    ObjectiveAlignment {
        aligned,
        total: goals.len(),
        score,
    }
}

/// `part / whole` as a rounded percentage. `whole` must be non-zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    round_score(part as f64 / whole as f64 * 100.0)
}

/// Rounds half up and clamps to 0..=100.
pub fn round_score(value: f64) -> u32 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ProgressBand::of(70.0), ProgressBand::OnTrack);
        assert_eq!(ProgressBand::of(69.9), ProgressBand::AtRisk);
        assert_eq!(ProgressBand::of(40.0), ProgressBand::AtRisk);
        assert_eq!(ProgressBand::of(39.0), ProgressBand::Behind);
        assert_eq!(ProgressBand::of(0.0), ProgressBand::Behind);
    }

    #[test]
    fn test_year_filter_drops_other_years_and_missing_dates() {
        let goals = vec![
            Goal::new("a", "in year", 50.0).with_due_date("2025-03-01"),
            Goal::new("b", "next year", 50.0).with_due_date("2026-01-01"),
            Goal::new("c", "no date", 50.0),
            Goal::new("d", "empty date", 50.0).with_due_date(""),
            Goal::new("e", "garbage", 50.0).with_due_date("soon"),
        ];
        let selected = year_end_goals(&goals, 2025);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "a");
    }

    #[test]
    fn test_breakdown_counts_sum_to_total() {
        let goals = vec![
            Goal::new("a", "", 90.0),
            Goal::new("b", "", 55.0),
            Goal::new("c", "", 10.0),
            Goal::new("d", "", 40.0),
        ];
        let refs: Vec<&Goal> = goals.iter().collect();
        let b = breakdown(&refs);
        assert_eq!((b.on_track, b.at_risk, b.behind, b.total), (1, 2, 1, 4));
    }

    #[test]
    fn test_alignment_of_empty_set_is_full() {
        let alignment = objective_alignment(&[]);
        assert_eq!(alignment.aligned, 0);
        assert_eq!(alignment.total, 0);
        assert_eq!(alignment.score, 100);
    }

    #[test]
    fn test_alignment_rounds_half_up() {
        let goals = vec![
            Goal::new("a", "", 0.0).with_parent("o1"),
            Goal::new("b", "", 0.0),
            Goal::new("c", "", 0.0),
        ];
        assert_eq!(objective_alignment(&goals).score, 33);

        let goals = vec![Goal::new("a", "", 0.0).with_parent("o1"), Goal::new("b", "", 0.0)];
        assert_eq!(objective_alignment(&goals).score, 50);
        assert_eq!(round_score(62.5), 63);
    }
}
