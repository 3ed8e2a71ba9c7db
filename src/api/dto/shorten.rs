//! DTOs for the short URL creation endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
///
/// A missing `url` deserializes to an empty string so it fails validation
/// with the same 400 response as a blank one.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "url must not be blank"))]
    pub url: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Created short URL.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_fails_validation() {
        let request: CreateShortUrlRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request.url, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_url_fails_validation() {
        let request = CreateShortUrlRequest {
            url: " \t ".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_non_blank_url_passes_validation() {
        let request = CreateShortUrlRequest {
            url: "not a url".to_string(),
        };

        // Format is checked by the service, not here
        assert!(request.validate().is_ok());
    }
}
