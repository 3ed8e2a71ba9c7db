//! Short URL repository implementations.
//!
//! - [`PgShortUrlRepository`] - PostgreSQL with primary/replica routing
//! - [`InMemoryShortUrlRepository`] - process-local storage for development and tests

pub mod memory_short_url_repository;
pub mod pg_short_url_repository;

pub use memory_short_url_repository::InMemoryShortUrlRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
