use crate::domain::errors::CalculationError;
use crate::domain::performance::{PerformanceRequest, PerformanceResponse};
use async_trait::async_trait;

/// Something that can score a request: the remote endpoint or the in-process algorithm.
#[async_trait]
pub trait PerformanceCalculator: Send + Sync {
    async fn calculate(
        &self,
        request: &PerformanceRequest,
    ) -> Result<PerformanceResponse, CalculationError>;

    /// Name used in logs and metrics labels.
    fn name(&self) -> &'static str;
}
