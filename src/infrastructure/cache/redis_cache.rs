//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, cache_key};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for fast URL lookups.
///
/// Entries are plain strings under `url:<code>`, written with `SET ... EX`
/// so Redis expires them on its own. `ConnectionManager` reconnects
/// transparently; it is cheap to clone for each command.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: Duration,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl` - TTL applied when [`CacheService::set_url`] is called
    ///   with `ttl = None`; controlled via the `CACHE_TTL_SECONDS` env var
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl: Duration) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl,
        })
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        CacheError::OperationError(e.to_string())
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let url = conn
            .get::<_, Option<String>>(cache_key(short_code))
            .await?;

        match &url {
            Some(url) => debug!("Cache HIT: {} -> {}", short_code, url),
            None => debug!("Cache MISS: {}", short_code),
        }

        Ok(url)
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let mut conn = self.client.clone();
        // SET EX rejects zero, so round sub-second TTLs up
        let ttl_seconds = ttl.unwrap_or(self.default_ttl).as_secs().max(1);

        conn.set_ex::<_, _, ()>(cache_key(short_code), original_url, ttl_seconds)
            .await?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            short_code, original_url, ttl_seconds
        );
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(cache_key(short_code)).await?;
        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", short_code);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
