//! Domain entities for signing keys and session tokens.

pub mod signing_key;
pub mod token;

// Re-export commonly used types
pub use signing_key::{sort_newest_first, SigningKeyRecord};
pub use token::{Token, TokenHeader, TokenStatus};
