//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process Moka cache for single-node deployments
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{
    CACHE_KEY_PREFIX, CacheError, CacheResult, CacheService, DEFAULT_CACHE_TTL, cache_key,
};

#[cfg(test)]
pub use service::MockCacheService;
