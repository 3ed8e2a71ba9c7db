//! Primary/replica routing of data-store operations.
//!
//! A [`DataSourceRouter`] owns one writable primary and zero or more read
//! replicas. Each call to [`DataSourceRouter::route`] picks exactly one of
//! them:
//!
//! | Intent      | Replicas | Target                              |
//! |-------------|----------|-------------------------------------|
//! | `ReadWrite` | any      | primary                             |
//! | `ReadOnly`  | none     | primary                             |
//! | `ReadOnly`  | N ≥ 1    | replica `counter % N` (round-robin) |
//!
//! The router is generic over the target so the same policy drives both the
//! PostgreSQL pools and plain labels in tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::domain::AccessIntent;

/// Which physical target an operation was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Primary,
    /// Zero-based replica index.
    Replica(usize),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Primary => write!(f, "primary"),
            DataSource::Replica(index) => write!(f, "replica-{}", index + 1),
        }
    }
}

/// Routes operations between a primary and its read replicas.
///
/// The only mutable state is the round-robin counter, advanced with a single
/// atomic `fetch_add`, so concurrent callers never lose or repeat an
/// increment. The counter wraps on overflow; the modulo keeps the index in
/// range.
pub struct DataSourceRouter<T> {
    primary: T,
    replicas: Vec<T>,
    counter: AtomicUsize,
}

impl<T> DataSourceRouter<T> {
    pub fn new(primary: T, replicas: Vec<T>) -> Self {
        Self {
            primary,
            replicas,
            counter: AtomicUsize::new(0),
        }
    }

    /// Router without replicas: every operation goes to the primary.
    pub fn primary_only(primary: T) -> Self {
        Self::new(primary, Vec::new())
    }

    /// Chooses the target for an operation with the given intent.
    ///
    /// Read-only calls advance the round-robin counter; other calls leave it
    /// untouched.
    pub fn select(&self, intent: AccessIntent) -> DataSource {
        if !intent.is_read_only() || self.replicas.is_empty() {
            return DataSource::Primary;
        }

        let value = self.counter.fetch_add(1, Ordering::Relaxed);
        DataSource::Replica(value % self.replicas.len())
    }

    /// Chooses a target for `intent` and returns its [`DataSource`] tag
    /// together with a reference to the target itself.
    pub fn route(&self, intent: AccessIntent) -> (DataSource, &T) {
        let source = self.select(intent);
        trace!(?intent, %source, "Routed data source");
        (source, self.get(source))
    }

    /// Returns the target behind `source`, falling back to the primary for
    /// an out-of-range replica index.
    pub fn get(&self, source: DataSource) -> &T {
        match source {
            DataSource::Primary => &self.primary,
            DataSource::Replica(index) => self.replicas.get(index).unwrap_or(&self.primary),
        }
    }

    pub fn primary(&self) -> &T {
        &self.primary
    }

    pub fn replicas(&self) -> &[T] {
        &self.replicas
    }

    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }
}

impl<T> fmt::Debug for DataSourceRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceRouter")
            .field("replicas", &self.replicas.len())
            .field("counter", &self.counter.load(Ordering::Relaxed))
            .finish()
    }
}
