//! Repository trait for short URL data access.

use crate::domain::AccessIntent;
use crate::domain::entities::{NewShortUrl, StoredShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage of short URLs.
///
/// Writes always run on the primary. Reads carry an explicit
/// [`AccessIntent`] that the implementation uses to pick a connection
/// target.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL primary + replicas
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process-local storage
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Inserts a new short URL on the primary and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store is unreachable or the
    /// insert violates a constraint (for instance a duplicate code).
    async fn save(&self, new_short_url: NewShortUrl) -> Result<StoredShortUrl, AppError>;

    /// Finds a short URL by its code on the target chosen for `intent`.
    ///
    /// Expired records are returned as-is; deciding what to do with them is
    /// the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on store errors.
    async fn find_by_code(
        &self,
        code: &str,
        intent: AccessIntent,
    ) -> Result<Option<StoredShortUrl>, AppError>;

    /// Checks that the primary answers queries.
    async fn health_check(&self) -> bool;
}
