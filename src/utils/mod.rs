//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - Random base62 short codes
//! - [`url_validator`] - Acceptance rules for original URLs

pub mod code_generator;
pub mod url_validator;
