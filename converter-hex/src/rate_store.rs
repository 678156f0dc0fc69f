//! Rate acquisition with an optional shared cache.
//!
//! The cache only bounds how often the upstream provider is called. Cache
//! trouble of any kind degrades to a direct provider fetch; provider failures
//! always reach the caller.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use converter_types::{CacheSettings, CacheStore, ConvertError, RateProvider, RateTable};

/// A live cache handle together with where the snapshot lives in it.
struct RateCache {
    store: Arc<dyn CacheStore>,
    settings: CacheSettings,
}

/// Source of the current rate table.
///
/// Whether a cache is used is fixed at construction.
pub struct RateStore<P: RateProvider> {
    provider: P,
    cache: Option<RateCache>,
}

impl<P: RateProvider> RateStore<P> {
    /// A store that always asks the provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: None,
        }
    }

    /// A store that caches the rate table in `cache`.
    pub fn with_cache(provider: P, cache: Arc<dyn CacheStore>, settings: CacheSettings) -> Self {
        Self {
            provider,
            cache: Some(RateCache {
                store: cache,
                settings,
            }),
        }
    }

    /// Wiring helper for the outcome of `connect_cache`.
    pub fn from_parts(
        provider: P,
        cache: Option<Arc<dyn CacheStore>>,
        settings: CacheSettings,
    ) -> Self {
        match cache {
            Some(cache) => Self::with_cache(provider, cache, settings),
            None => Self::new(provider),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns the current rate table.
    ///
    /// With a cache: a valid snapshot is returned without touching the
    /// provider; otherwise the provider is called and the result is written
    /// back with the configured TTL. Concurrent misses may each fetch and
    /// overwrite the snapshot.
    #[instrument(skip(self), fields(cached = self.cache.is_some()))]
    pub async fn get_rates(&self) -> Result<RateTable, ConvertError> {
        let Some(cache) = &self.cache else {
            return Ok(self.provider.fetch_rates().await?);
        };

        if let Some(table) = read_snapshot(cache).await {
            return Ok(table);
        }

        let table = self.provider.fetch_rates().await?;
        write_snapshot(cache, &table).await;
        Ok(table)
    }
}

async fn read_snapshot(cache: &RateCache) -> Option<RateTable> {
    let key = cache.settings.key.as_str();
    match cache.store.get(key).await {
        Ok(Some(snapshot)) => match serde_json::from_str(&snapshot) {
            Ok(table) => {
                debug!(key, "Rate cache hit");
                Some(table)
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable rate snapshot");
                None
            }
        },
        Ok(None) => {
            debug!(key, "Rate cache miss");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "Rate cache read failed, fetching from provider");
            None
        }
    }
}

async fn write_snapshot(cache: &RateCache, table: &RateTable) {
    let key = cache.settings.key.as_str();
    let snapshot = match serde_json::to_string(table) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(key, error = %e, "Could not serialize rate snapshot");
            return;
        }
    };

    if let Err(e) = cache.store.set_ex(key, &snapshot, cache.settings.ttl).await {
        warn!(key, error = %e, "Rate cache write failed");
    }
}
