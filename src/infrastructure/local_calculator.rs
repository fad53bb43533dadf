use crate::domain::errors::CalculationError;
use crate::domain::performance::{
    PerformanceRequest, PerformanceResponse, compute, compute_for_year,
};
use crate::domain::ports::PerformanceCalculator;
use async_trait::async_trait;

/// Runs the canonical algorithm in-process. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPerformanceCalculator {
    reference_year: Option<i32>,
}

impl LocalPerformanceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the year used to select goals instead of the current UTC year.
    pub fn for_year(year: i32) -> Self {
        Self {
            reference_year: Some(year),
        }
    }

    pub fn score(&self, request: &PerformanceRequest) -> PerformanceResponse {
        match self.reference_year {
            Some(year) => compute_for_year(
                &request.goals,
                &request.objectives,
                &request.timeframe,
                year,
            ),
            None => compute(&request.goals, &request.objectives, &request.timeframe),
        }
    }
}

#[async_trait]
impl PerformanceCalculator for LocalPerformanceCalculator {
    async fn calculate(
        &self,
        request: &PerformanceRequest,
    ) -> Result<PerformanceResponse, CalculationError> {
        Ok(self.score(request))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
