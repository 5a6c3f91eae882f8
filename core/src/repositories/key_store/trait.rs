//! Secret key store trait defining the interface for signing key persistence.

use async_trait::async_trait;
use ed25519_dalek::SigningKey;

use crate::domain::entities::signing_key::SigningKeyRecord;
use crate::errors::KeyStoreError;

/// Persistence contract for the signing keyring
///
/// Implementations are interchangeable storage backends (local directory,
/// object storage bucket). Every implementation must honour:
///
/// - `list` returns all keys newest first by creation time, and an empty
///   store yields an empty keyring rather than an error
/// - `read` and `delete` report `KeyStoreError::NotFound` for absent names
/// - a stored key that cannot be decoded is `KeyStoreError::Corrupted` on
///   both `read` and `list`; it is never skipped
///
/// Nothing is cached: callers observe rotations on their next `list`.
#[async_trait]
pub trait SecretKeyStore: Send + Sync {
    /// Persist a new key under `name`
    ///
    /// # Returns
    /// * `Ok(SigningKeyRecord)` - The stored record with its backend creation time
    /// * `Err(KeyStoreError)` - Invalid name, name already taken, or backend failure
    async fn write(&self, key: &SigningKey, name: &str) -> Result<SigningKeyRecord, KeyStoreError>;

    /// Load a single key by name
    ///
    /// # Returns
    /// * `Ok(SigningKeyRecord)` - Key found and decoded
    /// * `Err(KeyStoreError::NotFound)` - No key with that name
    /// * `Err(KeyStoreError::Corrupted)` - Stored material could not be decoded
    async fn read(&self, name: &str) -> Result<SigningKeyRecord, KeyStoreError>;

    /// Load the full keyring, newest first
    async fn list(&self) -> Result<Vec<SigningKeyRecord>, KeyStoreError>;

    /// Remove a key by name
    ///
    /// # Returns
    /// * `Ok(())` - Key removed
    /// * `Err(KeyStoreError::NotFound)` - No key with that name
    async fn delete(&self, name: &str) -> Result<(), KeyStoreError>;
}
