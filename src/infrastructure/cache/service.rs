//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Namespace prefix of every cache key.
pub const CACHE_KEY_PREFIX: &str = "url:";

/// Default lifetime of a cache entry, equal to the link lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Builds the cache key for a short code (`url:<code>`).
pub fn cache_key(short_code: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, short_code)
}

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of `code -> original URL` mappings with per-entry expiry.
///
/// Implementations report backend failures as [`CacheError`]. Callers treat
/// the cache as best-effort: a failed read counts as a miss and a failed
/// write is logged and dropped.
///
/// Cache TTLs must not exceed the link lifetime. A cache hit is served
/// without an expiry check, so an entry that outlives its link would keep
/// redirecting after the link expired.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process cache for single-node setups
/// - [`crate::infrastructure::cache::NullCache`] - always misses, for deployments without a cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend could not be queried.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping, overwriting any previous value for the code.
    ///
    /// `ttl = None` applies the implementation's default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend rejected the write.
    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()>;

    /// Removes a mapping immediately. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend could not be reached.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short name of the backend, used in logs and health reports.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_uses_prefix() {
        assert_eq!(cache_key("abcd1234"), "url:abcd1234");
    }

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(DEFAULT_CACHE_TTL.as_secs(), 86_400);
    }
}
