//! Configuration module for stratpulse.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Client and Observability.

mod client_config;
mod observability_config;
mod server_config;

pub use client_config::ClientEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub client: ClientEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let client = ClientEnvConfig::from_env().context("Failed to load client config")?;
        let observability = ObservabilityEnvConfig::from_env()
            .context("Failed to load observability config")?;

        Ok(Self {
            server,
            client,
            observability,
        })
    }
}

/// Parses `key` from the environment, falling back to `default` when unset.
/// A set but malformed value is an error.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key)),
        Err(_) => Ok(default),
    }
}

/// Reads an optional string, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
