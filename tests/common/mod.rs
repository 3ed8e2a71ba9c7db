#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use shortlink::domain::AccessIntent;
use shortlink::domain::entities::{NewShortUrl, StoredShortUrl};
use shortlink::domain::repositories::ShortUrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use shortlink::infrastructure::persistence::InMemoryShortUrlRepository;
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// In-memory repository that counts store calls and records read intents.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryShortUrlRepository,
    saves: AtomicUsize,
    reads: AtomicUsize,
    intents: Mutex<Vec<AccessIntent>>,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn intents(&self) -> Vec<AccessIntent> {
        self.intents.lock().unwrap().clone()
    }

    pub fn insert_record(&self, record: StoredShortUrl) {
        self.inner.insert_record(record);
    }
}

#[async_trait]
impl ShortUrlRepository for CountingRepository {
    async fn save(&self, new_short_url: NewShortUrl) -> Result<StoredShortUrl, AppError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(new_short_url).await
    }

    async fn find_by_code(
        &self,
        code: &str,
        intent: AccessIntent,
    ) -> Result<Option<StoredShortUrl>, AppError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.intents.lock().unwrap().push(intent);
        self.inner.find_by_code(code, intent).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

pub fn memory_cache() -> Arc<dyn CacheService> {
    Arc::new(MemoryCache::new(1_000, std::time::Duration::from_secs(3600)))
}

pub fn null_cache() -> Arc<dyn CacheService> {
    Arc::new(NullCache::new())
}

/// State over a counting in-memory repository; the repository handle is
/// returned for assertions.
pub fn create_test_state(cache: Arc<dyn CacheService>) -> (AppState, Arc<CountingRepository>) {
    let repository = Arc::new(CountingRepository::new());
    let state = AppState::new(repository.clone(), cache, BASE_URL);
    (state, repository)
}

/// A record created `age` ago with the standard 24 hour lifetime.
pub fn record_created_ago(id: i64, code: &str, url: &str, age: Duration) -> StoredShortUrl {
    let created_at = Utc::now() - age;
    let new = NewShortUrl::new(code.to_string(), url.to_string(), created_at);
    StoredShortUrl {
        id,
        code: new.code,
        original_url: new.original_url,
        created_at: new.created_at,
        expires_at: new.expires_at,
    }
}
