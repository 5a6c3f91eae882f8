//! Configuration module with concern-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `key_store` - Signing key storage backend and rotation policy
//! - `token` - Session token lifetimes

pub mod environment;
pub mod key_store;
pub mod token;

use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::is_valid_key_name;

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use key_store::{
    FilesystemStoreConfig, KeyStoreBackend, KeyStoreConfig, ObjectStorageConfig, RotationConfig,
};
pub use token::TokenConfig;

/// Prefix of environment variables overriding file configuration,
/// e.g. `TOKENVAULT__ROTATION__RETENTION=5`
pub const ENV_PREFIX: &str = "TOKENVAULT";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub key_store: KeyStoreConfig,

    #[serde(default)]
    pub rotation: RotationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the current environment
    ///
    /// Sources, lowest precedence first:
    /// 1. Built-in defaults
    /// 2. `config.{environment}.toml` in the working directory, if present
    /// 3. `TOKENVAULT__SECTION__KEY` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let builder = Self::defaults(environment)?
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Built-in defaults for `environment`, before any file or variable is applied
    pub fn defaults(environment: Environment) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let logging = LoggingConfig::for_environment(environment);
        Ok(config::Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format.as_str())?
            .set_default("logging.colored", logging.colored)?
            .set_default("logging.source_location", logging.source_location)?)
    }

    /// Build and validate configuration from an assembled source stack
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the token and key services cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.ttl_seconds <= 0 {
            return Err(ConfigError::invalid("token.ttl_seconds", "must be positive"));
        }
        if self.token.refresh_threshold_seconds < 0 {
            return Err(ConfigError::invalid(
                "token.refresh_threshold_seconds",
                "must not be negative",
            ));
        }
        if self.token.refresh_threshold_seconds >= self.token.ttl_seconds {
            return Err(ConfigError::invalid(
                "token.refresh_threshold_seconds",
                "must be below token.ttl_seconds",
            ));
        }
        if self.rotation.retention == 0 {
            return Err(ConfigError::invalid("rotation.retention", "must keep at least one key"));
        }

        match self.key_store.backend {
            KeyStoreBackend::Filesystem => {
                if !is_valid_key_name(&self.key_store.filesystem.prefix) {
                    return Err(ConfigError::invalid(
                        "key_store.filesystem.prefix",
                        "must be 1-128 characters of [A-Za-z0-9_-]",
                    ));
                }
            }
            KeyStoreBackend::ObjectStorage => {
                if self.key_store.object_storage.bucket.trim().is_empty() {
                    return Err(ConfigError::invalid("key_store.object_storage.bucket", "must be set"));
                }
                let storage = &self.key_store.object_storage;
                if storage.access_key_id.is_some() != storage.secret_access_key.is_some() {
                    return Err(ConfigError::invalid(
                        "key_store.object_storage",
                        "access_key_id and secret_access_key must be set together",
                    ));
                }
            }
        }

        Ok(())
    }
}
