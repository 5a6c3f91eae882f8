//! Signing key records held by a secret key store.

use chrono::{DateTime, Utc};
use ed25519_dalek::{SigningKey, VerifyingKey};

/// A named Ed25519 signing key together with its creation time
///
/// Records are immutable once written; a keyring is the list of all records
/// in a store ordered newest first.
#[derive(Clone)]
pub struct SigningKeyRecord {
    /// Logical key name, unique within a store
    pub name: String,
    /// Private key material
    pub key: SigningKey,
    /// When the key was persisted, as reported by the backend
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for SigningKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyRecord")
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl SigningKeyRecord {
    pub fn new(name: impl Into<String>, key: SigningKey, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            key,
            created_at,
        }
    }

    /// Public half used for signature verification
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }
}

/// Sort a keyring newest first, keeping the existing order between equal timestamps
pub fn sort_newest_first(keyring: &mut [SigningKeyRecord]) {
    keyring.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
