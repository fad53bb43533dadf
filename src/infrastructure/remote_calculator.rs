use crate::config::ClientEnvConfig;
use crate::domain::errors::CalculationError;
use crate::domain::performance::{PerformanceRequest, PerformanceResponse};
use crate::domain::ports::PerformanceCalculator;
use crate::infrastructure::core::HttpClientFactory;
use crate::infrastructure::observability::Metrics;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info};

/// Error body returned by the endpoint on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Calls the calculation endpoint over HTTP.
pub struct RemotePerformanceCalculator {
    client: ClientWithMiddleware,
    endpoint_url: String,
    api_key: Option<String>,
    metrics: Option<Metrics>,
}

impl RemotePerformanceCalculator {
    pub fn new(client: ClientWithMiddleware, endpoint_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
            api_key: None,
            metrics: None,
        }
    }

    /// Builds a calculator from client configuration, or `None` when no endpoint is set.
    pub fn from_config(config: &ClientEnvConfig) -> Option<Self> {
        let endpoint = config.endpoint_url.as_deref()?;
        let client = HttpClientFactory::create_client(config);
        let mut calculator = Self::new(client, endpoint);
        calculator.api_key = config.api_key.clone();
        Some(calculator)
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn post(
        &self,
        request: &PerformanceRequest,
    ) -> Result<PerformanceResponse, CalculationError> {
        let body = serde_json::to_string(request).map_err(|e| CalculationError::InvalidRequest {
            reason: e.to_string(),
        })?;

        let mut builder = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder
                .header("Authorization", format!("Bearer {}", key))
                .header("apikey", key);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| CalculationError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(CalculationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PerformanceResponse =
            response
                .json()
                .await
                .map_err(|e| CalculationError::MalformedResponse {
                    reason: e.to_string(),
                })?;
        parsed.validate()?;
        Ok(parsed)
    }
}

#[async_trait]
impl PerformanceCalculator for RemotePerformanceCalculator {
    async fn calculate(
        &self,
        request: &PerformanceRequest,
    ) -> Result<PerformanceResponse, CalculationError> {
        debug!(
            "Calling strategic performance endpoint {} with {} goals",
            self.endpoint_url,
            request.goals.len()
        );
        let started = Instant::now();
        let result = self.post(request).await;

        if let Some(metrics) = &self.metrics {
            let outcome = match &result {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            };
            metrics.observe_remote_latency(outcome, started.elapsed().as_secs_f64());
        }
        if let Ok(response) = &result {
            info!(
                "Strategic performance received: likelihood {} ({} risk factors)",
                response.strategic_likelihood,
                response.risk_factors.len()
            );
        }
        result
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
