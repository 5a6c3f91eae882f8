//! Configuration for the token service

use chrono::Duration;
use tv_shared::config::TokenConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Lifetime of an issued token; must be positive
    pub token_ttl: Duration,
    /// Remaining lifetime at or below which introspection re-issues the token
    pub refresh_threshold: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&TokenConfig::default())
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            token_ttl: Duration::seconds(config.ttl_seconds),
            refresh_threshold: Duration::seconds(config.refresh_threshold_seconds),
        }
    }
}
