//! Signing key storage and rotation configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which backend holds the signing keyring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyStoreBackend {
    /// PEM files in a local directory
    #[default]
    Filesystem,
    /// Objects in an S3-compatible bucket
    ObjectStorage,
}

/// Key store configuration; only the section matching `backend` is used
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct KeyStoreConfig {
    #[serde(default)]
    pub backend: KeyStoreBackend,

    #[serde(default)]
    pub filesystem: FilesystemStoreConfig,

    #[serde(default)]
    pub object_storage: ObjectStorageConfig,
}

/// Local directory keyring
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilesystemStoreConfig {
    /// Directory holding the key files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Filename prefix separating logical keyrings sharing a directory
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for FilesystemStoreConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            prefix: default_prefix(),
        }
    }
}

/// Bucket keyring
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectStorageConfig {
    /// Bucket dedicated to this keyring
    #[serde(default)]
    pub bucket: String,

    /// Bucket region
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible services (MinIO, GCS interop, ...)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Static access key; the default credential chain is used when absent
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret key paired with `access_key_id`
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
        }
    }
}

/// Key rotation policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RotationConfig {
    /// Number of signing keys kept after a rotation, including the new one
    #[serde(default = "default_retention")]
    pub retention: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("keys")
}

fn default_prefix() -> String {
    String::from("session")
}

fn default_region() -> String {
    String::from("us-east-1")
}

fn default_retention() -> usize {
    3
}
