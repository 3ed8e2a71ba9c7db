//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::cache::CacheService;

/// Cloneable handle to the services and backends of a running instance.
///
/// The repository and cache are trait objects so one state type serves the
/// PostgreSQL and in-memory backends alike.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn ShortUrlRepository>>,
    pub redirect_service: Arc<RedirectService<dyn ShortUrlRepository>>,
    pub repository: Arc<dyn ShortUrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub base_url: String,
}

impl AppState {
    /// Wires both services over the same repository and cache.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(repository.clone(), cache.clone()));
        let redirect_service = Arc::new(RedirectService::new(repository.clone(), cache.clone()));

        Self {
            shorten_service,
            redirect_service,
            repository,
            cache,
            base_url: base_url.into(),
        }
    }
}
