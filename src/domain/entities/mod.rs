//! Core domain entities.
//!
//! A short URL takes three shapes over its life:
//!
//! - [`NewShortUrl`] - input for the store, no identifier yet
//! - [`StoredShortUrl`] - full record read from the store
//! - [`ShortUrl`] - what resolution returns: either a stored record or the
//!   partial `code -> url` pair rebuilt from the cache

pub mod short_url;

pub use short_url::{LINK_TTL_HOURS, NewShortUrl, ShortUrl, StoredShortUrl, link_ttl};
