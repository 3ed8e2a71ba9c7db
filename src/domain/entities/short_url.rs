//! Short URL entity in its three shapes: about to be stored, stored, and cached.

use chrono::{DateTime, Duration, Utc};

/// Lifetime of a short URL, measured from its creation.
pub const LINK_TTL_HOURS: i64 = 24;

/// Returns [`LINK_TTL_HOURS`] as a [`Duration`].
pub fn link_ttl() -> Duration {
    Duration::hours(LINK_TTL_HOURS)
}

/// Input data for persisting a new short URL.
///
/// Carries everything except the identifier, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortUrl {
    /// Builds a record created at `now` that expires [`LINK_TTL_HOURS`] later.
    pub fn new(code: String, original_url: String, now: DateTime<Utc>) -> Self {
        Self {
            code,
            original_url,
            created_at: now,
            expires_at: Some(now + link_ttl()),
        }
    }
}

/// A short URL as loaded from the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredShortUrl {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredShortUrl {
    /// Returns true if the record has passed its expiry time.
    ///
    /// Records without an expiry never expire.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Same as [`Self::is_expired`], evaluated at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now > e)
    }
}

/// A resolved short URL, tagged with where it came from.
///
/// The cache only holds `code -> original_url`, so a cache hit cannot
/// produce the id or the timestamps. Callers that need them have to match on
/// the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortUrl {
    /// Full record read from (or just written to) the durable store.
    Stored(StoredShortUrl),
    /// Partial record rebuilt from a cache entry.
    Cached { code: String, original_url: String },
}

impl ShortUrl {
    pub fn code(&self) -> &str {
        match self {
            ShortUrl::Stored(record) => &record.code,
            ShortUrl::Cached { code, .. } => code,
        }
    }

    pub fn original_url(&self) -> &str {
        match self {
            ShortUrl::Stored(record) => &record.original_url,
            ShortUrl::Cached { original_url, .. } => original_url,
        }
    }

    /// Returns the stored record, or `None` for a cache-sourced value.
    pub fn as_stored(&self) -> Option<&StoredShortUrl> {
        match self {
            ShortUrl::Stored(record) => Some(record),
            ShortUrl::Cached { .. } => None,
        }
    }

    pub fn is_from_cache(&self) -> bool {
        matches!(self, ShortUrl::Cached { .. })
    }
}

impl From<StoredShortUrl> for ShortUrl {
    fn from(record: StoredShortUrl) -> Self {
        ShortUrl::Stored(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(expires_at: Option<DateTime<Utc>>) -> StoredShortUrl {
        StoredShortUrl {
            id: 1,
            code: "abcd1234".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_new_short_url_expires_after_ttl() {
        let now = Utc::now();
        let new = NewShortUrl::new("abcd1234".to_string(), "https://a.io".to_string(), now);

        assert_eq!(new.created_at, now);
        assert_eq!(new.expires_at, Some(now + Duration::hours(24)));
    }

    #[test]
    fn test_is_expired() {
        assert!(stored(Some(Utc::now() - Duration::seconds(1))).is_expired());
        assert!(!stored(Some(Utc::now() + Duration::hours(1))).is_expired());
        assert!(!stored(None).is_expired());
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let expiry = Utc::now();
        let record = stored(Some(expiry));

        assert!(!record.is_expired_at(expiry));
        assert!(record.is_expired_at(expiry + Duration::milliseconds(1)));
    }

    #[test]
    fn test_accessors_for_both_variants() {
        let full = ShortUrl::from(stored(None));
        assert_eq!(full.code(), "abcd1234");
        assert_eq!(full.original_url(), "https://example.com");
        assert!(full.as_stored().is_some());
        assert!(!full.is_from_cache());

        let partial = ShortUrl::Cached {
            code: "zzzz9999".to_string(),
            original_url: "https://cached.example".to_string(),
        };
        assert_eq!(partial.code(), "zzzz9999");
        assert_eq!(partial.original_url(), "https://cached.example");
        assert!(partial.as_stored().is_none());
        assert!(partial.is_from_cache());
    }
}
