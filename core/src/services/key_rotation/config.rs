//! Configuration for key rotation

use tv_shared::config::RotationConfig;

use crate::errors::{DomainError, DomainResult};

/// Key rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRotationConfig {
    retention: usize,
}

impl KeyRotationConfig {
    /// Keep `retention` keys after each rotation, the new key included
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Validation)` - `retention` is zero, which would
    ///   delete the key that was just written
    pub fn new(retention: usize) -> DomainResult<Self> {
        if retention == 0 {
            return Err(DomainError::Validation {
                message: "Key retention must be at least 1".to_string(),
            });
        }
        Ok(Self { retention })
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

impl Default for KeyRotationConfig {
    fn default() -> Self {
        Self { retention: 3 }
    }
}

impl TryFrom<&RotationConfig> for KeyRotationConfig {
    type Error = DomainError;

    fn try_from(config: &RotationConfig) -> Result<Self, Self::Error> {
        Self::new(config.retention)
    }
}
