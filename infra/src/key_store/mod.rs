//! Signing Key Store Backends
//!
//! Interchangeable [`SecretKeyStore`] implementations:
//!
//! - **Filesystem**: PEM files in a local directory, several keyrings per directory
//! - **Object storage**: PEM objects in a dedicated S3-compatible bucket
//!
//! Both store PKCS#8 PEM so keys can be moved between backends by copying files.

use std::sync::Arc;

use tracing::info;
use tv_core::repositories::SecretKeyStore;
use tv_shared::config::{KeyStoreBackend, KeyStoreConfig};

use crate::InfrastructureError;

pub mod filesystem;
mod pem;

// Object storage backend (feature-gated)
#[cfg(feature = "object-storage")]
pub mod object_storage;

pub use filesystem::FilesystemKeyStore;
#[cfg(feature = "object-storage")]
pub use object_storage::ObjectStorageKeyStore;

#[cfg(test)]
mod tests;

/// Create the key store selected by configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn SecretKeyStore>)` - The configured backend
/// * `Err(InfrastructureError)` - Invalid backend settings, or object storage
///   requested without the `object-storage` feature
pub async fn build_key_store(
    config: &KeyStoreConfig,
) -> Result<Arc<dyn SecretKeyStore>, InfrastructureError> {
    match config.backend {
        KeyStoreBackend::Filesystem => {
            let store = FilesystemKeyStore::from_config(&config.filesystem)?;
            info!(
                directory = %store.directory().display(),
                prefix = %config.filesystem.prefix,
                "Using filesystem key store"
            );
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        KeyStoreBackend::ObjectStorage => {
            let store = ObjectStorageKeyStore::from_config(&config.object_storage).await?;
            info!(bucket = %store.bucket(), "Using object storage key store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "object-storage"))]
        KeyStoreBackend::ObjectStorage => Err(InfrastructureError::Config(
            "object storage key store requires the `object-storage` feature".to_string(),
        )),
    }
}
