//! Services built on the secret key store.

pub mod key_rotation;
pub mod token;

// Re-export commonly used types
pub use key_rotation::{
    generate_signing_key, KeyRotationConfig, KeyRotationService, RotationResult,
};
pub use token::{TokenService, TokenServiceConfig};
