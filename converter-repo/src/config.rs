//! Adapter configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_types::CacheSettings;

use crate::provider::DEFAULT_RATES_URL;

/// Upstream rate provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RATES_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ProviderConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let url = var("RATES_API_URL").unwrap_or(defaults.url);
        let timeout = match var("RATES_API_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.parse()?),
            None => defaults.timeout,
        };

        Ok(Self { url, timeout })
    }
}

/// Connection details of a Redis server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
}

/// Which cache backs the rate store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis(RedisConfig),
    Memory,
}

/// Cache configuration: the backend (if any) and the key/TTL of the snapshot.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    pub backend: Option<CacheBackend>,
    pub settings: CacheSettings,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// `CACHE_BACKEND` selects `redis`, `memory` or `none`. When unset, Redis
    /// is used if `REDIS_HOST` is present and no cache otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let redis = match var("REDIS_HOST") {
            Some(host) => Some(RedisConfig {
                host,
                port: var("REDIS_PORT").map_or(Ok(6379), |p| p.parse())?,
                password: var("REDIS_PASSWORD").filter(|p| !p.is_empty()),
                db: var("REDIS_DB").map_or(Ok(0), |db| db.parse())?,
            }),
            None => None,
        };

        let backend = match var("CACHE_BACKEND").as_deref() {
            None => redis.map(CacheBackend::Redis),
            Some("none") => None,
            Some("memory") => Some(CacheBackend::Memory),
            Some("redis") => Some(CacheBackend::Redis(redis.ok_or_else(|| {
                anyhow::anyhow!("REDIS_HOST environment variable is required for CACHE_BACKEND=redis")
            })?)),
            Some(other) => anyhow::bail!("Unknown CACHE_BACKEND: {}", other),
        };

        let mut settings = CacheSettings::default();
        if let Some(key) = var("CACHE_KEY") {
            settings.key = key;
        }
        if let Some(secs) = var("CACHE_TTL_SECS") {
            settings.ttl = Duration::from_secs(secs.parse()?);
        }

        Ok(Self { backend, settings })
    }
}
