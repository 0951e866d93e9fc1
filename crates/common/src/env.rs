//! Environment helpers
//!
//! Thin wrappers over `std::env` that treat blank values as unset.

use tracing::warn;

/// Read an environment variable, returning `None` when it is unset or blank.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable; unparsable values are ignored with a warning.
pub fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = non_empty_var(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
