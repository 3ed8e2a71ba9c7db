//! Process-local short URL repository.
//!
//! Used when `STORAGE_BACKEND=memory`: local development without PostgreSQL
//! and integration tests. There are no replicas, so the access intent is
//! ignored. Data is lost when the process exits.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use crate::domain::AccessIntent;
use crate::domain::entities::{NewShortUrl, StoredShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// In-memory repository keyed by code.
///
/// `DashMap` shards its locks, so lookups of different codes do not block
/// each other.
#[derive(Debug)]
pub struct InMemoryShortUrlRepository {
    records: DashMap<String, StoredShortUrl>,
    next_id: AtomicI64,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a record as-is, keeping its id and timestamps.
    ///
    /// Lets tests and tooling seed records that `save` would never produce,
    /// such as already expired ones.
    pub fn insert_record(&self, record: StoredShortUrl) {
        self.next_id.fetch_max(record.id + 1, Ordering::Relaxed);
        self.records.insert(record.code.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryShortUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn save(&self, new_short_url: NewShortUrl) -> Result<StoredShortUrl, AppError> {
        match self.records.entry(new_short_url.code.clone()) {
            Entry::Occupied(_) => Err(AppError::persistence(
                "Unique constraint violation",
                json!({ "constraint": "short_urls_code_key", "code": new_short_url.code }),
            )),
            Entry::Vacant(slot) => {
                let record = StoredShortUrl {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    code: new_short_url.code,
                    original_url: new_short_url.original_url,
                    created_at: new_short_url.created_at,
                    expires_at: new_short_url.expires_at,
                };
                debug!(code = %record.code, id = record.id, "Inserted short URL in memory");
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(
        &self,
        code: &str,
        _intent: AccessIntent,
    ) -> Result<Option<StoredShortUrl>, AppError> {
        Ok(self.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
