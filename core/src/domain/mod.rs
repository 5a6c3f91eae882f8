//! Domain layer containing signing key and token entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{sort_newest_first, SigningKeyRecord, Token, TokenHeader, TokenStatus};
