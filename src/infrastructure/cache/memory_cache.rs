//! In-process cache backed by Moka.

use super::service::{CacheResult, CacheService, cache_key};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedUrl {
    original_url: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, CachedUrl> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedUrl,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedUrl,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory cache for single-node deployments.
///
/// Entries are evicted when their TTL elapses or when the capacity is
/// reached. Nothing is shared between processes.
pub struct MemoryCache {
    cache: Cache<String, CachedUrl>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` mappings.
    pub fn new(max_entries: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache, default_ttl }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let url = self
            .cache
            .get(&cache_key(short_code))
            .await
            .map(|entry| entry.original_url);

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
        let entry = CachedUrl {
            original_url: original_url.to_string(),
            ttl: ttl.unwrap_or(self.default_ttl),
        };

        self.cache.insert(cache_key(short_code), entry).await;
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.cache.invalidate(&cache_key(short_code)).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
