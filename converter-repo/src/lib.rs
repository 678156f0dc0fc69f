//! # Converter Repository
//!
//! Concrete outbound adapters for the currency converter:
//! - `provider` - HTTP client for the upstream rate provider (`RateProvider`)
//! - `memory` - In-process TTL cache (`CacheStore`)
//! - `redis_cache` - Shared Redis cache (`CacheStore`, feature `redis`)
//! - `config` - Adapter configuration read from the environment

use std::sync::Arc;

use converter_types::CacheStore;
use tracing::{info, warn};

pub mod config;
pub mod memory;
pub mod provider;
#[cfg(feature = "redis")]
pub mod redis_cache;


pub use config::{CacheBackend, CacheConfig, ProviderConfig, RedisConfig};
pub use memory::InMemoryCache;
pub use provider::{DEFAULT_RATES_URL, HttpRateProvider};
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;

/// Connect to the configured cache backend.
///
/// Returns `None` when no backend is configured or when the backend cannot be
/// reached. A failed connection is logged and never returned as an error: the
/// converter then runs without a cache for the lifetime of the process.
///
/// # Examples
///
/// ```ignore
/// let cache = connect_cache(config.cache.backend.as_ref()).await;
/// let store = match cache {
///     Some(cache) => RateStore::with_cache(provider, cache, config.cache.settings),
///     None => RateStore::new(provider),
/// };
/// ```
pub async fn connect_cache(backend: Option<&CacheBackend>) -> Option<Arc<dyn CacheStore>> {
    match backend? {
        CacheBackend::Memory => {
            info!("Using in-process rate cache");
            Some(Arc::new(InMemoryCache::new()))
        }
        #[cfg(feature = "redis")]
        CacheBackend::Redis(config) => match RedisCache::connect(config).await {
            Ok(cache) => {
                info!(host = %config.host, port = config.port, "Connected to Redis rate cache");
                Some(Arc::new(cache))
            }
            Err(e) => {
                warn!(host = %config.host, port = config.port, error = %e, "Redis unavailable, rates will be fetched without cache");
                None
            }
        },
        #[cfg(not(feature = "redis"))]
        CacheBackend::Redis(config) => {
            warn!(host = %config.host, "Built without the `redis` feature, rates will be fetched without cache");
            None
        }
    }
}
