//! # Tokenvault Core
//!
//! Signed session tokens backed by a rotating keyring of Ed25519 signing keys.
//! This crate contains the domain entities, the secret key store contract,
//! the token codec, the token service (issue, verify, introspect) and the
//! key rotation service. Storage backends live in `tv_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
