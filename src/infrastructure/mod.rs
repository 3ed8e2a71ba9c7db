//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis, in-process and no-op implementations)
//! - [`datasource`] - Primary/replica routing of store operations
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod datasource;
pub mod persistence;
