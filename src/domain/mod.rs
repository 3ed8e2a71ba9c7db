//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by the
//! infrastructure layer; business flows live in
//! [`crate::application::services`].
//!
//! - [`entities`] - short URL data structures
//! - [`repositories`] - data access trait definitions
//! - [`access_intent`] - read/write intent passed with every store call

pub mod access_intent;
pub mod entities;
pub mod repositories;

pub use access_intent::AccessIntent;
