//! Short code resolution service (cache-aside).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::AccessIntent;
use crate::domain::entities::ShortUrl;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service resolving short codes back to their original URLs.
///
/// # Request Flow
///
/// 1. Look the code up in the cache
/// 2. On a hit, return a [`ShortUrl::Cached`] record right away
/// 3. On a miss, read the store through a read-only (replica) connection
/// 4. Reject unknown or expired records with [`AppError::NotFound`]
/// 5. Write the mapping back to the cache and return [`ShortUrl::Stored`]
///
/// # Cache Strategy
///
/// - **Cache hit**: served without an expiry check. The cache TTL never
///   exceeds the link TTL, so the cache drops an entry before its link expires.
/// - **Cache miss**: store lookup, then repopulation
/// - **Cache error**: logged and handled as a miss
/// - **Repopulation error**: logged, the store result is still returned
pub struct RedirectService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: ShortUrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Resolves a short code.
    ///
    /// A store miss is final: the lookup is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or its record has expired.
    ///
    /// Returns [`AppError::Persistence`] if the store lookup fails after a cache miss.
    pub async fn resolve(&self, code: &str) -> Result<ShortUrl, AppError> {
        match self.cache.get_url(code).await {
            Ok(Some(original_url)) => {
                debug!("Cache HIT for {}", code);
                return Ok(ShortUrl::Cached {
                    code: code.to_string(),
                    original_url,
                });
            }
            Ok(None) => debug!("Cache MISS for {}", code),
            Err(e) => warn!("Cache lookup failed for {}, falling back to store: {}", code, e),
        }

        let record = self
            .repository
            .find_by_code(code, AccessIntent::ReadOnly)
            .await?
            .ok_or_else(|| AppError::code_not_found(code))?;

        if record.is_expired() {
            debug!(code, expires_at = ?record.expires_at, "Short URL has expired");
            return Err(AppError::code_not_found(code));
        }

        if let Err(e) = self
            .cache
            .set_url(&record.code, &record.original_url, None)
            .await
        {
            warn!("Failed to repopulate cache for {}: {}", code, e);
        }

        Ok(ShortUrl::Stored(record))
    }
}
