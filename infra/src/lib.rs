//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's contracts:
//!
//! - **Key store**: filesystem and S3-compatible object storage backends
//!   for [`SecretKeyStore`](tv_core::repositories::SecretKeyStore)
//! - **Logging**: `tracing-subscriber` initialisation from configuration
//!
//! ## Features
//!
//! - `object-storage`: Enable the S3-compatible bucket backend (default)

// Re-export core types for convenience
pub use tv_core::errors::*;

/// Signing key store backends and their construction from configuration
pub mod key_store;

/// Tracing subscriber setup
pub mod logging;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),

    /// Key store construction failed
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}

impl From<tv_shared::ConfigError> for InfrastructureError {
    fn from(err: tv_shared::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}
