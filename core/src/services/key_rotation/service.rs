//! Key rotation service implementation

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::SecretKeyStore;

use super::config::KeyRotationConfig;
use super::generator::new_key_name;

/// Summary of a completed rotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationResult {
    /// Name of the key written by this rotation
    pub new_key: String,
    /// Keys deleted to honour the retention limit, newest first
    pub pruned: Vec<String>,
    /// Keys left in the store
    pub retained: usize,
}

/// Service rotating the signing keyring
///
/// Rotation runs write, list and delete as separate store operations with no
/// transaction and no lock; it assumes a single scheduled caller. A failure
/// aborts at that step and keeps whatever was already done: a new key that
/// was written stays, and pruning resumes on the next successful rotation.
pub struct KeyRotationService<S: SecretKeyStore + ?Sized, G> {
    store: Arc<S>,
    generate_key: G,
    config: KeyRotationConfig,
}

impl<S, G> KeyRotationService<S, G>
where
    S: SecretKeyStore + ?Sized,
    G: Fn() -> SigningKey + Send + Sync,
{
    /// Create a new rotation service
    ///
    /// # Arguments
    ///
    /// * `store` - Key store holding the keyring
    /// * `generate_key` - Source of new key pairs, e.g. [`generate_signing_key`](super::generate_signing_key)
    /// * `config` - Retention policy
    pub fn new(store: Arc<S>, generate_key: G, config: KeyRotationConfig) -> Self {
        Self {
            store,
            generate_key,
            config,
        }
    }

    /// Run a single rotation
    ///
    /// 1. Generate a key and store it under a fresh name
    /// 2. List the keyring, newest first
    /// 3. Delete every key beyond the retention limit
    ///
    /// # Returns
    /// * `Ok(RotationResult)` - New key name and pruned key names
    /// * `Err(DomainError)` - The first failing store operation
    pub async fn rotate(&self) -> DomainResult<RotationResult> {
        let key = (self.generate_key)();
        let record = self.store.write(&key, &new_key_name()).await?;
        info!(key = %record.name, "Stored new signing key");

        let mut keyring = self.store.list().await?;
        // Equal creation times order arbitrarily; the key just written is the newest
        if let Some(pos) = keyring.iter().position(|stored| stored.name == record.name) {
            keyring[..=pos].rotate_right(1);
        }
        let retention = self.config.retention();

        let mut pruned = Vec::new();
        for stale in keyring.iter().skip(retention) {
            if let Err(e) = self.store.delete(&stale.name).await {
                error!(key = %stale.name, error = %e, "Failed to prune signing key");
                if !pruned.is_empty() {
                    warn!(
                        pruned = pruned.len(),
                        remaining = keyring.len() - retention - pruned.len(),
                        "Rotation pruned the keyring partially"
                    );
                }
                return Err(e.into());
            }
            pruned.push(stale.name.clone());
        }

        info!(
            new_key = %record.name,
            pruned = pruned.len(),
            retained = keyring.len() - pruned.len(),
            "Signing key rotation completed"
        );

        Ok(RotationResult {
            new_key: record.name,
            retained: keyring.len() - pruned.len(),
            pruned,
        })
    }
}
