//! Utility functions and helpers.

pub mod dirs;
pub mod http;
pub mod url;

pub use self::url::{extract_prod_id, resolve_url};

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
