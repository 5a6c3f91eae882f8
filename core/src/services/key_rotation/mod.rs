//! Signing key rotation
//!
//! Generates a new signing key, stores it, and prunes the keyring down to
//! the configured retention. Rotation is triggered externally; nothing here
//! schedules it.

mod config;
mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::KeyRotationConfig;
pub use generator::{generate_signing_key, new_key_name};
pub use service::{KeyRotationService, RotationResult};
