//! Cache store port.
//!
//! The subset of a key-value store the converter needs: `GET`, `SETEX`
//! and a `PING` liveness probe.

use std::time::Duration;

use crate::error::CacheError;

/// Port trait for a shared key-value cache.
///
/// Implementations must be safe for concurrent use by many requests.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), CacheError>;
}
