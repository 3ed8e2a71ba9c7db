//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Resolution goes through [`crate::application::services::RedirectService`]:
/// cache first, then a read-only store lookup that repopulates the cache.
///
/// # Response
///
/// `302 Found` with the original URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let short_url = state.redirect_service.resolve(&code).await?;

    debug!(
        code = short_url.code(),
        from_cache = short_url.is_from_cache(),
        "Redirecting"
    );

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, short_url.original_url().to_string())],
    ))
}
