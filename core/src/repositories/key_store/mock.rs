//! Mock implementation of SecretKeyStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ed25519_dalek::SigningKey;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::signing_key::SigningKeyRecord;
use crate::errors::KeyStoreError;

use super::r#trait::SecretKeyStore;

#[derive(Default)]
struct Failures {
    write: bool,
    list: bool,
    delete: HashSet<String>,
}

/// In-memory key store with failure injection
///
/// Keys are ordered by creation time, newest first; keys created at the same
/// instant are ordered by insertion, latest first.
pub struct MockSecretKeyStore {
    // (insertion sequence, record)
    keys: Arc<RwLock<Vec<(u64, SigningKeyRecord)>>>,
    failures: Arc<RwLock<Failures>>,
    next_seq: AtomicU64,
}

impl MockSecretKeyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(Failures::default())),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a key with an explicit creation time, bypassing failure injection
    pub async fn seed(&self, name: &str, key: SigningKey, created_at: DateTime<Utc>) {
        let mut keys = self.keys.write().await;
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        keys.push((seq, SigningKeyRecord::new(name, key, created_at)));
    }

    /// Make every subsequent `write` fail
    pub async fn fail_writes(&self, fail: bool) {
        self.failures.write().await.write = fail;
    }

    /// Make every subsequent `list` fail
    pub async fn fail_lists(&self, fail: bool) {
        self.failures.write().await.list = fail;
    }

    /// Make `delete` of a specific key fail
    pub async fn fail_delete_of(&self, name: &str) {
        self.failures.write().await.delete.insert(name.to_string());
    }

    /// Clear all injected failures
    pub async fn heal(&self) {
        *self.failures.write().await = Failures::default();
    }

    /// Key names, newest first
    pub async fn names(&self) -> Vec<String> {
        self.sorted().await.into_iter().map(|r| r.name).collect()
    }

    async fn sorted(&self) -> Vec<SigningKeyRecord> {
        let mut keys = self.keys.read().await.clone();
        keys.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        keys.into_iter().map(|(_, record)| record).collect()
    }
}

impl Default for MockSecretKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretKeyStore for MockSecretKeyStore {
    async fn write(&self, key: &SigningKey, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        if self.failures.read().await.write {
            return Err(KeyStoreError::backend("injected write failure"));
        }

        let mut keys = self.keys.write().await;
        if keys.iter().any(|(_, r)| r.name == name) {
            return Err(KeyStoreError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let record = SigningKeyRecord::new(name, key.clone(), Utc::now());
        keys.push((seq, record.clone()));
        Ok(record)
    }

    async fn read(&self, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        let keys = self.keys.read().await;
        keys.iter()
            .find(|(_, r)| r.name == name)
            .map(|(_, r)| r.clone())
            .ok_or_else(|| KeyStoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<SigningKeyRecord>, KeyStoreError> {
        if self.failures.read().await.list {
            return Err(KeyStoreError::backend("injected list failure"));
        }
        Ok(self.sorted().await)
    }

    async fn delete(&self, name: &str) -> Result<(), KeyStoreError> {
        if self.failures.read().await.delete.contains(name) {
            return Err(KeyStoreError::backend(format!("injected delete failure for {}", name)));
        }

        let mut keys = self.keys.write().await;
        let before = keys.len();
        keys.retain(|(_, r)| r.name != name);
        if keys.len() == before {
            return Err(KeyStoreError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
