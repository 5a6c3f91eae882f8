//! Session token lifetime configuration

use serde::{Deserialize, Serialize};

/// Lifetime settings for issued session tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Time between issuance and expiry, in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    /// Remaining lifetime (seconds) at or below which an introspected
    /// token is transparently re-issued
    #[serde(default = "default_refresh_threshold_seconds")]
    pub refresh_threshold_seconds: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            refresh_threshold_seconds: default_refresh_threshold_seconds(),
        }
    }
}

impl TokenConfig {
    /// Set token lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_seconds = minutes * 60;
        self
    }

    /// Set refresh threshold in minutes
    pub fn with_refresh_threshold_minutes(mut self, minutes: i64) -> Self {
        self.refresh_threshold_seconds = minutes * 60;
        self
    }
}

fn default_ttl_seconds() -> i64 {
    3600 // 1 hour
}

fn default_refresh_threshold_seconds() -> i64 {
    900 // 15 minutes
}
