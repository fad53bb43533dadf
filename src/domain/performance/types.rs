use crate::domain::errors::CalculationError;
use crate::domain::goals::{Goal, Objective, lenient};
use serde::{Deserialize, Deserializer, Serialize};

/// The only timeframe label with defined semantics.
pub const CURRENT_YEAR_TIMEFRAME: &str = "current_year";

/// Body of a remote invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRequest {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub goals: Vec<Goal>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub objectives: Vec<Objective>,
    #[serde(default = "default_timeframe", deserialize_with = "timeframe_or_default")]
    pub timeframe: String,
}

impl PerformanceRequest {
    pub fn new(goals: Vec<Goal>, objectives: Vec<Objective>) -> Self {
        Self {
            goals,
            objectives,
            timeframe: default_timeframe(),
        }
    }
}

fn default_timeframe() -> String {
    CURRENT_YEAR_TIMEFRAME.to_string()
}

fn timeframe_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::label_or(deserializer, CURRENT_YEAR_TIMEFRAME)
}

/// Goal counts per progress band, restricted to goals due this year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub on_track: usize,
    pub at_risk: usize,
    pub behind: usize,
    pub total: usize,
}

/// Share of all goals linked to an objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveAlignment {
    pub aligned: usize,
    pub total: usize,
    pub score: u32,
}

/// `[low, high]` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceInterval(pub u32, pub u32);

impl ConfidenceInterval {
    /// Builds `[score - range, score + range]` clamped to 0..=100.
    pub fn around(score: u32, range: u32) -> Self {
        Self(score.saturating_sub(range), (score + range).min(100))
    }

    pub fn low(&self) -> u32 {
        self.0
    }

    pub fn high(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub strategic_likelihood: u32,
    pub risk_factors: Vec<String>,
    pub confidence_interval: ConfidenceInterval,
    pub recommendations: Vec<String>,
    pub breakdown: Breakdown,
    pub objective_alignment: ObjectiveAlignment,
}

impl PerformanceResponse {
    /// Checks the structural invariants every response must satisfy.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let violation = |reason: String| -> Result<(), CalculationError> {
            Err(CalculationError::InvalidResponse { reason })
        };

        let b = &self.breakdown;
        if b.on_track + b.at_risk + b.behind != b.total {
            return violation(format!(
                "breakdown {}+{}+{} does not sum to total {}",
                b.on_track, b.at_risk, b.behind, b.total
            ));
        }
        if self.strategic_likelihood > 100 {
            return violation(format!(
                "strategic likelihood {} exceeds 100",
                self.strategic_likelihood
            ));
        }
        let ci = self.confidence_interval;
        if ci.low() > self.strategic_likelihood
            || self.strategic_likelihood > ci.high()
            || ci.high() > 100
        {
            return violation(format!(
                "confidence interval [{}, {}] does not bracket likelihood {}",
                ci.low(),
                ci.high(),
                self.strategic_likelihood
            ));
        }
        let a = &self.objective_alignment;
        if a.aligned > a.total || a.score > 100 {
            return violation(format!(
                "objective alignment {}/{} with score {} is out of bounds",
                a.aligned, a.total, a.score
            ));
        }
        if self.recommendations.is_empty() {
            return violation("recommendations are empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PerformanceResponse {
        PerformanceResponse {
            strategic_likelihood: 62,
            risk_factors: vec!["50% of goals are significantly behind".to_string()],
            confidence_interval: ConfidenceInterval::around(62, 12),
            recommendations: vec!["Strategic targets appear well-positioned".to_string()],
            breakdown: Breakdown {
                on_track: 1,
                at_risk: 0,
                behind: 1,
                total: 2,
            },
            objective_alignment: ObjectiveAlignment {
                aligned: 1,
                total: 3,
                score: 33,
            },
        }
    }

    #[test]
    fn test_wire_shape_uses_camel_case_and_array_interval() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["strategicLikelihood"], 62);
        assert_eq!(json["confidenceInterval"], serde_json::json!([50, 74]));
        assert_eq!(json["breakdown"]["onTrack"], 1);
        assert_eq!(json["breakdown"]["atRisk"], 0);
        assert_eq!(json["objectiveAlignment"]["score"], 33);
    }

    #[test]
    fn test_response_survives_wire_round_trip() {
        let original = sample();
        let wire = serde_json::to_string(&original).unwrap();
        let parsed: PerformanceResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_interval_clamps_to_bounds() {
        assert_eq!(ConfidenceInterval::around(5, 12), ConfidenceInterval(0, 17));
        assert_eq!(ConfidenceInterval::around(95, 12), ConfidenceInterval(83, 100));
    }

    #[test]
    fn test_validate_rejects_broken_breakdown() {
        let mut response = sample();
        response.breakdown.total = 5;
        assert!(matches!(
            response.validate(),
            Err(CalculationError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_interval_not_bracketing_score() {
        let mut response = sample();
        response.confidence_interval = ConfidenceInterval(70, 80);
        assert!(response.validate().is_err());
    }

    #[test]
    fn test_request_timeframe_defaults_to_current_year() {
        let request: PerformanceRequest = serde_json::from_str(r#"{"goals":[]}"#).unwrap();
        assert_eq!(request.timeframe, CURRENT_YEAR_TIMEFRAME);
        assert!(request.objectives.is_empty());
    }

    #[test]
    fn test_request_tolerates_null_and_wrong_typed_envelope() {
        let request: PerformanceRequest =
            serde_json::from_str(r#"{"goals":null,"objectives":null,"timeframe":null}"#).unwrap();
        assert!(request.goals.is_empty());
        assert!(request.objectives.is_empty());
        assert_eq!(request.timeframe, CURRENT_YEAR_TIMEFRAME);

        let request: PerformanceRequest =
            serde_json::from_str(r#"{"goals":[],"timeframe":2025}"#).unwrap();
        assert_eq!(request.timeframe, CURRENT_YEAR_TIMEFRAME);
    }

    #[test]
    fn test_request_rejects_goals_that_are_not_a_list() {
        assert!(serde_json::from_str::<PerformanceRequest>(r#"{"goals":"none"}"#).is_err());
    }
}
