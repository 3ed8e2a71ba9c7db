//! Application layer services implementing business logic.
//!
//! Services orchestrate the repository and the cache and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short URL creation
//! - [`services::redirect_service::RedirectService`] - Cache-aside code resolution

pub mod services;
