//! Shared configuration and utilities for the tokenvault crates
//!
//! - Configuration types and loading
//! - Key name validation

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, KeyStoreBackend, KeyStoreConfig, LoggingConfig,
    RotationConfig, TokenConfig,
};
pub use utils::validation;
