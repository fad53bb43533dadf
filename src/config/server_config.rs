//! Calculation endpoint configuration parsing from environment variables.

use super::{optional_env, parse_env};
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 54321;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Dashboard origins allowed by default (one per app dev server)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
    "http://localhost:5176",
    "http://localhost:5177",
];

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        Ok(Self {
            host: optional_env("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_env("SERVER_PORT", defaults.port)?,
            cors_origins,
            max_body_bytes: parse_env("MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .context(format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
