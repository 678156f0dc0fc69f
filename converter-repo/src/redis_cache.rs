//! Redis cache adapter.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tokio::time::timeout;

use converter_types::{CacheError, CacheStore};

use crate::config::RedisConfig;

/// Budget for connecting and for the initial `PING`.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Budget for a single `GET` / `SETEX` once connected.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

/// Cache backed by a shared Redis server.
///
/// Clones share one multiplexed connection that reconnects on its own.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    command_timeout: Duration,
}

impl RedisCache {
    /// Connects and checks liveness with a `PING`, within [`CONNECT_TIMEOUT`].
    pub async fn connect(config: &RedisConfig) -> Result<Self, CacheError> {
        Self::connect_with_timeouts(config, CONNECT_TIMEOUT, COMMAND_TIMEOUT).await
    }

    pub async fn connect_with_timeouts(
        config: &RedisConfig,
        connect_budget: Duration,
        command_budget: Duration,
    ) -> Result<Self, CacheError> {
        let client = redis::Client::open(connection_info(config))
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(connect_budget)
            .set_response_timeout(command_budget);
        let conn = timeout(
            connect_budget,
            client.get_connection_manager_with_config(manager_config),
        )
        .await
        .map_err(|_| CacheError::Timeout(connect_budget))?
        .map_err(|e| CacheError::Connection(e.to_string()))?;

        let cache = Self {
            conn,
            command_timeout: command_budget,
        };
        timeout(connect_budget, cache.ping())
            .await
            .map_err(|_| CacheError::Timeout(connect_budget))??;

        Ok(cache)
    }
}

/// Connection parameters built field by field, so credentials never go
/// through URL parsing.
fn connection_info(config: &RedisConfig) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
        redis: RedisConnectionInfo {
            db: config.db,
            password: config.password.clone(),
            ..Default::default()
        },
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = timeout(self.command_timeout, conn.get(key))
            .await
            .map_err(|_| CacheError::Timeout(self.command_timeout))?
            .map_err(|e| CacheError::Command(e.to_string()))?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        let _: () = timeout(self.command_timeout, conn.set_ex(key, value, seconds))
            .await
            .map_err(|_| CacheError::Timeout(self.command_timeout))?
            .map_err(|e| CacheError::Command(e.to_string()))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(())
    }
}
