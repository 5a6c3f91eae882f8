//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a logical key name or filename prefix
pub const MAX_KEY_NAME_LENGTH: usize = 128;

// Names end up in file paths and object keys, so separators and dots are excluded
static KEY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap()
});

/// Check whether a string is usable as a signing key name or filename prefix
pub fn is_valid_key_name(name: &str) -> bool {
    KEY_NAME_REGEX.is_match(name)
}
