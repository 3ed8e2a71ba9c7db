//! Validation of URLs submitted for shortening.
//!
//! The accepted input is stored verbatim; validation never rewrites it.

use url::Url;

/// Maximum accepted length of an original URL, matching the `url_original` column.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Blank,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("unsupported scheme '{0}', only http and https are accepted")]
    UnsupportedScheme(String),
}

/// Checks that `input` is a well-formed `http` or `https` URL.
///
/// # Rules
///
/// 1. Not empty or whitespace-only
/// 2. At most [`MAX_URL_LENGTH`] characters
/// 3. No embedded whitespace or control characters (neither survives a
///    redirect `Location` header)
/// 4. Every `%` starts a two-digit hex escape
/// 5. Parses as an absolute URL
/// 6. Scheme is exactly `http` or `https`; the comparison is case-sensitive and
///    runs on the scheme as written, since the parser lowercases it
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Blank);
    }

    if input.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain whitespace".to_string(),
        ));
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain control characters".to_string(),
        ));
    }

    if has_malformed_escape(input) {
        return Err(UrlValidationError::InvalidFormat(
            "malformed percent escape".to_string(),
        ));
    }

    Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    let written_scheme = input.split(':').next().unwrap_or_default();

    match written_scheme {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedScheme(
            written_scheme.to_string(),
        )),
    }
}

/// True if some `%` is not followed by two hex digits.
fn has_malformed_escape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()
            )
    })
}
