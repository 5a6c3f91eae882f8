//! Directory-backed signing key store
//!
//! Each key is a PKCS#8 PEM file named `{prefix}-{name}`. Several logical
//! keyrings can share one directory as long as their prefixes differ. The
//! file modification time is the key's creation time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ed25519_dalek::SigningKey;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use tv_core::domain::{sort_newest_first, SigningKeyRecord};
use tv_core::repositories::SecretKeyStore;
use tv_shared::config::FilesystemStoreConfig;
use tv_shared::validation::is_valid_key_name;

use super::pem;
use crate::KeyStoreError;

/// Signing key store over a local directory
#[derive(Debug, Clone)]
pub struct FilesystemKeyStore {
    directory: PathBuf,
    prefix: String,
}

impl FilesystemKeyStore {
    /// Create a store over `directory` using `prefix` for its file names
    ///
    /// The directory is created on first write; until then the keyring is empty.
    ///
    /// # Returns
    /// * `Err(KeyStoreError::InvalidName)` - `prefix` is not a valid key name
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, KeyStoreError> {
        let prefix = prefix.into();
        if !is_valid_key_name(&prefix) {
            return Err(KeyStoreError::InvalidName { name: prefix });
        }
        Ok(Self {
            directory: directory.into(),
            prefix,
        })
    }

    pub fn from_config(config: &FilesystemStoreConfig) -> Result<Self, KeyStoreError> {
        Self::new(config.directory.clone(), config.prefix.clone())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, KeyStoreError> {
        if !is_valid_key_name(name) {
            return Err(KeyStoreError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.directory.join(format!("{}-{}", self.prefix, name)))
    }

    /// Logical key name of a directory entry, if it belongs to this keyring
    fn logical_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let name = file_name.strip_prefix(self.prefix.as_str())?.strip_prefix('-')?;
        is_valid_key_name(name).then_some(name)
    }

    async fn load(&self, name: &str, path: &Path) -> Result<SigningKeyRecord, KeyStoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| io_error(name, e))?;
        let key = pem::decode(name, &bytes)?;
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| io_error(name, e))?;

        Ok(SigningKeyRecord::new(name, key, modified_at(metadata.modified())?))
    }
}

#[async_trait]
impl SecretKeyStore for FilesystemKeyStore {
    async fn write(&self, key: &SigningKey, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        let path = self.path_for(name)?;
        let pem = pem::encode(key)?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(KeyStoreError::backend)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => KeyStoreError::AlreadyExists {
                name: name.to_string(),
            },
            _ => KeyStoreError::backend(e),
        })?;

        let written = async {
            file.write_all(pem.as_bytes()).await?;
            file.sync_all().await?;
            Ok::<_, std::io::Error>(file.metadata().await?)
        }
        .await;

        let metadata = match written {
            Ok(metadata) => metadata,
            Err(e) => {
                drop(file);
                // A half-written file would surface as corrupted on every list
                let _ = tokio::fs::remove_file(&path).await;
                return Err(KeyStoreError::backend(e));
            }
        };

        debug!(key = %name, path = %path.display(), "Wrote signing key file");
        Ok(SigningKeyRecord::new(name, key.clone(), modified_at(metadata.modified())?))
    }

    async fn read(&self, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        let path = self.path_for(name)?;
        self.load(name, &path).await
    }

    async fn list(&self) -> Result<Vec<SigningKeyRecord>, KeyStoreError> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(directory = %self.directory.display(), "Keyring directory does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(KeyStoreError::backend(e)),
        };

        let mut candidates = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(KeyStoreError::backend)? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(|f| self.logical_name(f)) else {
                continue;
            };
            let file_type = entry.file_type().await.map_err(KeyStoreError::backend)?;
            if file_type.is_file() {
                candidates.push((name.to_string(), entry.path()));
            }
        }
        // Directory iteration order is unspecified; fix it before the stable sort
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut keyring = Vec::with_capacity(candidates.len());
        for (name, path) in candidates {
            match self.load(&name, &path).await {
                Ok(record) => keyring.push(record),
                // Pruned by a concurrent rotation since the directory scan
                Err(KeyStoreError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        sort_newest_first(&mut keyring);

        debug!(directory = %self.directory.display(), keys = keyring.len(), "Listed signing keys");
        Ok(keyring)
    }

    async fn delete(&self, name: &str) -> Result<(), KeyStoreError> {
        let path = self.path_for(name)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| io_error(name, e))?;

        debug!(key = %name, "Deleted signing key file");
        Ok(())
    }
}

fn io_error(name: &str, err: std::io::Error) -> KeyStoreError {
    match err.kind() {
        ErrorKind::NotFound => KeyStoreError::NotFound {
            name: name.to_string(),
        },
        _ => KeyStoreError::backend(err),
    }
}

fn modified_at(modified: std::io::Result<SystemTime>) -> Result<DateTime<Utc>, KeyStoreError> {
    modified.map(DateTime::<Utc>::from).map_err(KeyStoreError::backend)
}
