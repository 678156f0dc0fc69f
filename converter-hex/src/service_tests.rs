//! RateStore and ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::Instant;

    use converter_types::{
        CacheError, CacheSettings, CacheStore, ConvertError, ProviderError, RateProvider,
        RateTable,
    };

    use crate::service::{compute_conversion, resolve_symbol};
    use crate::{ConversionService, RateStore};

    const TTL: Duration = Duration::from_secs(3600);

    fn sample_rates() -> RateTable {
        RateTable::from_pairs([("USD", 0.87), ("EUR", 1.0), ("CZK", 0.04)]).unwrap()
    }

    fn settings(key: &str) -> CacheSettings {
        CacheSettings {
            key: key.to_string(),
            ttl: TTL,
        }
    }

    /// Provider returning a fixed outcome and counting its calls.
    pub struct MockProvider {
        outcome: Result<RateTable, ProviderError>,
        fetches: AtomicUsize,
    }

    impl MockProvider {
        pub fn new(rates: RateTable) -> Self {
            Self {
                outcome: Ok(rates),
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn failing(err: ProviderError) -> Self {
            Self {
                outcome: Err(err),
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn fetch_rates(&self) -> Result<RateTable, ProviderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Simple in-memory cache that counts writes and can be switched to fail.
    pub struct MockCache {
        entries: Mutex<HashMap<String, (String, Instant)>>,
        writes: AtomicUsize,
        broken: bool,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                writes: AtomicUsize::new(0),
                broken: false,
            }
        }

        pub fn broken() -> Self {
            Self {
                broken: true,
                ..Self::new()
            }
        }

        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Instant::now() + TTL));
        }
    }

    #[async_trait]
    impl CacheStore for MockCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            if self.broken {
                return Err(CacheError::Command("connection reset".into()));
            }
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .get(key)
                .filter(|(_, expires_at)| Instant::now() < *expires_at)
                .map(|(value, _)| value.clone()))
        }

        async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
            if self.broken {
                return Err(CacheError::Command("connection reset".into()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
            Ok(())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            Ok(())
        }
    }

    fn uncached_service() -> ConversionService<MockProvider> {
        ConversionService::new(RateStore::new(MockProvider::new(sample_rates())))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_single_conversion() {
        let service = uncached_service();

        let result = service.convert(1.0, "USD", Some("EUR")).await.unwrap();
        assert_eq!(result.input.amount, 1.0);
        assert_eq!(result.input.currency, "USD");
        assert_eq!(result.output.len(), 1);
        assert_eq!(result.output["EUR"], 0.87);

        let result = service.convert(1.0, "CZK", Some("USD")).await.unwrap();
        assert_eq!(result.input.currency, "CZK");
        assert_eq!(result.output.len(), 1);
        assert_eq!(result.output["USD"], 0.05);
    }

    #[tokio::test]
    async fn test_all_conversion() {
        let service = uncached_service();

        let result = service.convert(1.0, "USD", None).await.unwrap();

        assert_eq!(result.input.currency, "USD");
        let output: Vec<(&str, f64)> = result
            .output
            .iter()
            .map(|(code, amount)| (code.as_str(), *amount))
            .collect();
        assert_eq!(output, [("USD", 1.0), ("EUR", 0.87), ("CZK", 21.75)]);
    }

    #[tokio::test]
    async fn test_symbols_are_resolved() {
        let service = uncached_service();

        let result = service.convert(1.0, "$", Some("€")).await.unwrap();

        assert_eq!(result.input.currency, "USD");
        assert_eq!(result.output["EUR"], 0.87);
    }

    #[tokio::test]
    async fn test_same_currency_is_not_special() {
        let service = uncached_service();

        let result = service.convert(12.34, "CZK", Some("Kč")).await.unwrap();

        assert_eq!(result.output.len(), 1);
        approx::assert_abs_diff_eq!(result.output["CZK"], 12.34, epsilon = 1e-9);
        assert_eq!(result.input.amount, 12.34);
    }

    #[tokio::test]
    async fn test_unknown_input_currency() {
        let service = uncached_service();

        let result = service.convert(1.0, "XXX", None).await;

        assert!(matches!(result, Err(ConvertError::UnknownCurrency(code)) if code == "XXX"));
    }

    #[tokio::test]
    async fn test_unknown_output_currency() {
        let service = uncached_service();

        // £ resolves to GBP, which the table does not list
        let result = service.convert(1.0, "USD", Some("£")).await;

        assert!(matches!(result, Err(ConvertError::UnknownCurrency(code)) if code == "GBP"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_propagated() {
        let service = ConversionService::new(RateStore::new(MockProvider::failing(
            ProviderError::Status(503),
        )));

        let result = service.convert(1.0, "USD", Some("EUR")).await;

        assert!(matches!(
            result,
            Err(ConvertError::ProviderUnavailable(ProviderError::Status(503)))
        ));
    }

    #[test]
    fn test_engine_helpers() {
        assert_eq!(resolve_symbol("₽"), "RUB");
        assert_eq!(resolve_symbol("1x"), "1x");
        approx::assert_abs_diff_eq!(compute_conversion(1.0, 0.87, 1.0), 0.87);
        approx::assert_abs_diff_eq!(compute_conversion(1.0, 0.04, 1.0), 0.04);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Store
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_no_cache_always_fetches() {
        let provider = Arc::new(MockProvider::new(sample_rates()));
        let store = RateStore::new(provider.clone());
        assert!(!store.is_cached());

        for _ in 0..3 {
            assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        }

        assert_eq!(provider.fetches(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_and_expiry() {
        let provider = Arc::new(MockProvider::new(sample_rates()));
        let cache = Arc::new(MockCache::new());
        let store = RateStore::with_cache(provider.clone(), cache.clone(), settings("test:rates"));

        // Empty cache: one fetch, one write
        assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        assert_eq!(provider.fetches(), 1);
        assert_eq!(cache.writes(), 1);

        // Within the TTL: served from cache
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        assert_eq!(provider.fetches(), 1);
        assert_eq!(cache.writes(), 1);

        // Past the TTL: exactly one more fetch
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        assert_eq!(provider.fetches(), 2);
        assert_eq!(cache.writes(), 2);
    }

    #[tokio::test]
    async fn test_cache_shared_between_stores() {
        let cache = Arc::new(MockCache::new());
        let first = Arc::new(MockProvider::new(sample_rates()));
        let second = Arc::new(MockProvider::new(sample_rates()));

        let store_a = RateStore::with_cache(first.clone(), cache.clone(), settings("shared"));
        let store_b = RateStore::with_cache(second.clone(), cache.clone(), settings("shared"));

        store_a.get_rates().await.unwrap();
        store_b.get_rates().await.unwrap();

        assert_eq!(first.fetches(), 1);
        assert_eq!(second.fetches(), 0);
    }

    #[tokio::test]
    async fn test_cache_keys_are_isolated() {
        let cache = Arc::new(MockCache::new());
        let provider = Arc::new(MockProvider::new(sample_rates()));

        let store_a = RateStore::with_cache(provider.clone(), cache.clone(), settings("run-a"));
        let store_b = RateStore::with_cache(provider.clone(), cache.clone(), settings("run-b"));

        store_a.get_rates().await.unwrap();
        store_b.get_rates().await.unwrap();

        assert_eq!(provider.fetches(), 2);
        assert_eq!(cache.writes(), 2);
    }

    #[tokio::test]
    async fn test_broken_cache_degrades_to_provider() {
        let provider = Arc::new(MockProvider::new(sample_rates()));
        let store = RateStore::with_cache(
            provider.clone(),
            Arc::new(MockCache::broken()),
            settings("test:rates"),
        );

        assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        assert_eq!(store.get_rates().await.unwrap(), sample_rates());

        assert_eq!(provider.fetches(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_is_replaced() {
        let provider = Arc::new(MockProvider::new(sample_rates()));
        let cache = Arc::new(MockCache::new());
        cache.put_raw("test:rates", "not json");
        let store = RateStore::with_cache(provider.clone(), cache.clone(), settings("test:rates"));

        assert_eq!(store.get_rates().await.unwrap(), sample_rates());
        assert_eq!(provider.fetches(), 1);
        assert_eq!(cache.writes(), 1);

        // The rewritten snapshot is now served
        store.get_rates().await.unwrap();
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_not_swallowed_by_cache() {
        let cache = Arc::new(MockCache::new());
        let store = RateStore::with_cache(
            MockProvider::failing(ProviderError::Transport("connection refused".into())),
            cache.clone(),
            settings("test:rates"),
        );

        let result = store.get_rates().await;

        assert!(matches!(result, Err(ConvertError::ProviderUnavailable(_))));
        assert_eq!(cache.writes(), 0);
    }

    #[tokio::test]
    async fn test_from_parts_without_cache() {
        let store = RateStore::from_parts(
            MockProvider::new(sample_rates()),
            None,
            CacheSettings::default(),
        );
        assert!(!store.is_cached());

        let cache: Arc<dyn CacheStore> = Arc::new(MockCache::new());
        let store = RateStore::from_parts(
            MockProvider::new(sample_rates()),
            Some(cache),
            CacheSettings::default(),
        );
        assert!(store.is_cached());
    }
}
