//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /urls` - Create a short URL
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/urls", post(shorten_handler))
}
