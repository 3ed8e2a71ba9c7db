//! Handler for short URL creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, ShortUrlResponse};
use crate::application::services::build_short_url;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "aB3xY9kQ",
///   "short_url": "http://localhost:3000/aB3xY9kQ",
///   "original_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: `url` missing or blank
/// - **422 Unprocessable Entity**: `url` is not an absolute http/https URL
/// - **500 Internal Server Error**: the store rejected the insert
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateShortUrlRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    payload.validate()?;

    let stored = state.shorten_service.shorten(&payload.url).await?;
    let short_url = build_short_url(&state.base_url, &stored.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse {
            code: stored.code,
            short_url,
            original_url: stored.original_url,
        }),
    ))
}
