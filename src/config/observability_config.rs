//! Observability configuration parsing from environment variables.

use super::parse_env;
use anyhow::Result;

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
    /// Seconds between pushed metric snapshots
    pub interval_secs: u64,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            enabled: parse_env("OBSERVABILITY_ENABLED", defaults.enabled)?,
            interval_secs: parse_env("OBSERVABILITY_INTERVAL", defaults.interval_secs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_config_defaults() {
        let config = ObservabilityEnvConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval_secs, 60);
    }
}
