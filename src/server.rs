//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend (PostgreSQL primary and replicas, or in-memory),
//! selects the cache, and runs the Axum server until a shutdown signal.

use crate::config::{CacheBackend, Config, StorageBackend};
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::datasource::{DataSource, DataSourceRouter};
use crate::infrastructure::persistence::{InMemoryShortUrlRepository, PgShortUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage: one pool per PostgreSQL target with migrations applied on the
///   primary, or the in-memory store
/// - Cache: Redis (falling back to NullCache if unreachable), in-memory, or none
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - A database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let cache = build_cache(&config).await;

    let state = AppState::new(repository, cache, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Builds the configured storage backend.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn ShortUrlRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Storage: in-memory (records are lost on restart)");
            Ok(Arc::new(InMemoryShortUrlRepository::new()))
        }
        StorageBackend::Postgres => {
            let router = connect_postgres(config).await?;
            Ok(Arc::new(PgShortUrlRepository::new(Arc::new(router))))
        }
    }
}

/// Connects the primary and every replica, then applies migrations on the primary.
pub async fn connect_postgres(config: &Config) -> Result<DataSourceRouter<PgPool>> {
    let primary_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let primary = connect_pool(config, primary_url)
        .await
        .context("Failed to connect to primary database")?;
    tracing::info!("Connected to primary database");

    sqlx::migrate!("./migrations")
        .run(&primary)
        .await
        .context("Failed to apply migrations")?;

    let mut replicas = Vec::with_capacity(config.replica_urls.len());
    for (i, url) in config.replica_urls.iter().enumerate() {
        let pool = connect_pool(config, url)
            .await
            .with_context(|| format!("Failed to connect to replica {}", i + 1))?;
        replicas.push(pool);
    }
    if !replicas.is_empty() {
        tracing::info!("Connected to {} read replica(s)", replicas.len());
    }

    Ok(DataSourceRouter::new(primary, replicas))
}

/// Opens one pool with the configured pool settings. Runs no migrations.
pub async fn connect_pool(config: &Config, url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
}

/// Outcome of a connectivity check against one target.
#[derive(Debug)]
pub struct ConnectionCheck {
    pub source: DataSource,
    pub error: Option<String>,
}

impl ConnectionCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Connects to the primary and every replica and runs `SELECT 1` on each.
///
/// Read-only: no migrations are applied. Every target is checked even if an
/// earlier one failed.
pub async fn check_connections(config: &Config) -> Result<Vec<ConnectionCheck>> {
    let primary_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let targets = std::iter::once((DataSource::Primary, primary_url)).chain(
        config
            .replica_urls
            .iter()
            .enumerate()
            .map(|(i, url)| (DataSource::Replica(i), url.as_str())),
    );

    let mut checks = Vec::with_capacity(config.replica_urls.len() + 1);
    for (source, url) in targets {
        let result = match connect_pool(config, url).await {
            Ok(pool) => {
                let ping = sqlx::query("SELECT 1").fetch_one(&pool).await.map(|_| ());
                pool.close().await;
                ping
            }
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            tracing::warn!(%source, "Connection check failed: {}", e);
        }

        checks.push(ConnectionCheck {
            source,
            error: result.err().map(|e| e.to_string()),
        });
    }

    Ok(checks)
}

/// Selects the cache backend. An unreachable Redis degrades to [`NullCache`].
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::connect(redis_url, config.cache_ttl()).await {
                Ok(redis) => {
                    tracing::info!("Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                    Arc::new(NullCache::new())
                }
            }
        }
        (CacheBackend::Memory, _) => {
            tracing::info!(
                "Cache enabled (in-memory, {} entries)",
                config.cache_max_entries
            );
            Arc::new(MemoryCache::new(config.cache_max_entries, config.cache_ttl()))
        }
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
