//! Remote calculation client configuration parsing from environment variables.

use super::{optional_env, parse_env};
use anyhow::Result;

/// Client environment configuration
#[derive(Debug, Clone)]
pub struct ClientEnvConfig {
    /// Full URL of the calculation endpoint; `None` means score locally
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ClientEnvConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            api_key: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
        }
    }
}

impl ClientEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            endpoint_url: optional_env("PERFORMANCE_ENDPOINT_URL"),
            api_key: optional_env("PERFORMANCE_API_KEY"),
            timeout_secs: parse_env("HTTP_TIMEOUT_SECS", defaults.timeout_secs)?,
            connect_timeout_secs: parse_env(
                "HTTP_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            max_retries: parse_env("HTTP_MAX_RETRIES", defaults.max_retries)?,
        })
    }

    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}
