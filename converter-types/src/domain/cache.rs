//! Cache placement of the rate table.

use std::time::Duration;

/// Key under which the rate table snapshot is cached.
pub const DEFAULT_CACHE_KEY: &str = "CurrencyConverter:rates";

/// How long a cached snapshot stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Where and for how long the rate store caches the rate table.
///
/// Every store pointed at the same backend with the same key shares one
/// snapshot; tests pick a unique key to stay isolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub key: String,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_CACHE_KEY.to_string(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}
