//! Short URL creation service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::entities::{NewShortUrl, StoredShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;

/// Service for creating short URLs.
///
/// Creation is a single step: validate, generate a code, insert on the
/// primary, then warm the cache. There is no intermediate state and no
/// rollback. Once the insert succeeds the record is returned, even if the
/// cache write fails.
pub struct ShortenService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: ShortUrlRepository + ?Sized> ShortenService<R> {
    /// Creates a new shorten service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Shortens `original_url` and returns the stored record.
    ///
    /// The URL is stored exactly as given. The record expires
    /// [`crate::domain::entities::LINK_TTL_HOURS`] hours after creation.
    ///
    /// # Code Generation
    ///
    /// The code is generated once and not checked for uniqueness beforehand;
    /// a collision surfaces as a persistence error from the unique index.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is blank, unparseable or
    /// not `http`/`https`.
    ///
    /// Returns [`AppError::Persistence`] if the insert fails.
    pub async fn shorten(&self, original_url: &str) -> Result<StoredShortUrl, AppError> {
        validate_url(original_url)?;

        let new_short_url = NewShortUrl::new(generate_code(), original_url.to_string(), Utc::now());

        let stored = self.repository.save(new_short_url).await?;

        if let Err(e) = self
            .cache
            .set_url(&stored.code, &stored.original_url, None)
            .await
        {
            warn!("Failed to cache new short URL {}: {}", stored.code, e);
        }

        info!(code = %stored.code, id = stored.id, "Created short URL");

        Ok(stored)
    }
}

/// Builds the public short URL for a code under `base_url`.
pub fn build_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
