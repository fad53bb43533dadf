use crate::config::ClientEnvConfig;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware.
    ///
    /// Retries and timeouts live here, in the transport. The calculators
    /// themselves never retry.
    pub fn create_client(config: &ClientEnvConfig) -> ClientWithMiddleware {
        // Exponential backoff on transient failures (connect errors, 5xx, 429)
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}
