//! Configuration loading from environment.

use std::env;

use converter_repo::{CacheConfig, ProviderConfig};

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub otel_enabled: bool,
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let otel_enabled = env::var("OTEL_ENABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            otel_enabled,
            provider: ProviderConfig::from_env()?,
            cache: CacheConfig::from_env()?,
        })
    }
}
