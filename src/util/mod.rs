//! Small helpers shared by the UI layer.
//!
//! - **Text**: Unicode-aware width, truncation and control-character stripping
//! - **URLs**: validation before opening anything in the system browser

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Longest search bar input accepted, in characters.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 64;
