//! Exchange rate provider port.
//!
//! Implementations can be HTTP clients, fixed tables for tests, etc.

use std::sync::Arc;

use exchange_rates::RateTable;

use crate::error::ProviderError;

/// Port trait for the upstream rate provider.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the current rate table.
    ///
    /// Every call is a fresh upstream request; caching is the caller's job.
    async fn fetch_rates(&self) -> Result<RateTable, ProviderError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    async fn fetch_rates(&self) -> Result<RateTable, ProviderError> {
        (**self).fetch_rates().await
    }
}
