//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::AccessIntent;
use crate::domain::entities::{NewShortUrl, StoredShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::datasource::DataSourceRouter;

/// Row layout of the `short_urls` table.
#[derive(Debug, sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    code: String,
    url_original: String,
    criada_em: DateTime<Utc>,
    expira_em: Option<DateTime<Utc>>,
}

impl From<ShortUrlRow> for StoredShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        StoredShortUrl {
            id: row.id,
            code: row.code,
            original_url: row.url_original,
            created_at: row.criada_em,
            expires_at: row.expira_em,
        }
    }
}

/// PostgreSQL repository backed by one primary pool and N replica pools.
///
/// Inserts run on the primary. Lookups are routed by the shared
/// [`DataSourceRouter`], so read-only lookups rotate over the replicas.
pub struct PgShortUrlRepository {
    router: Arc<DataSourceRouter<PgPool>>,
}

impl PgShortUrlRepository {
    /// Creates a repository over a set of routed pools.
    pub fn new(router: Arc<DataSourceRouter<PgPool>>) -> Self {
        Self { router }
    }

    /// Creates a repository over a single pool used for reads and writes.
    pub fn with_pool(pool: PgPool) -> Self {
        Self::new(Arc::new(DataSourceRouter::primary_only(pool)))
    }

    pub fn router(&self) -> &DataSourceRouter<PgPool> {
        &self.router
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn save(&self, new_short_url: NewShortUrl) -> Result<StoredShortUrl, AppError> {
        let (source, pool) = self.router.route(AccessIntent::ReadWrite);

        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (code, url_original, criada_em, expira_em)
            VALUES ($1, $2, $3, $4)
            RETURNING id, code, url_original, criada_em, expira_em
            "#,
        )
        .bind(&new_short_url.code)
        .bind(&new_short_url.original_url)
        .bind(new_short_url.created_at)
        .bind(new_short_url.expires_at)
        .fetch_one(pool)
        .await?;

        debug!(code = %row.code, id = row.id, %source, "Inserted short URL");

        Ok(row.into())
    }

    async fn find_by_code(
        &self,
        code: &str,
        intent: AccessIntent,
    ) -> Result<Option<StoredShortUrl>, AppError> {
        let (source, pool) = self.router.route(intent);

        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, code, url_original, criada_em, expira_em
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(pool)
        .await?;

        debug!(code, %source, found = row.is_some(), "Looked up short URL");

        Ok(row.map(StoredShortUrl::from))
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.router.primary())
            .await
            .is_ok()
    }
}
