//! S3-compatible bucket signing key store
//!
//! The bucket is dedicated to one keyring: object keys are the logical key
//! names and each object holds a PKCS#8 PEM document. The object's
//! last-modified time is the key's creation time.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::{ByteStream, DateTime as S3DateTime};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use ed25519_dalek::SigningKey;
use tracing::{debug, info};

use tv_core::domain::{sort_newest_first, SigningKeyRecord};
use tv_core::repositories::SecretKeyStore;
use tv_shared::config::ObjectStorageConfig;
use tv_shared::validation::is_valid_key_name;

use super::pem;
use crate::{InfrastructureError, KeyStoreError};

const PEM_CONTENT_TYPE: &str = "application/x-pem-file";

/// Signing key store over an S3-compatible bucket
#[derive(Debug, Clone)]
pub struct ObjectStorageKeyStore {
    client: Client,
    bucket: String,
}

impl ObjectStorageKeyStore {
    /// Wrap an existing client
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from configuration
    ///
    /// Static credentials are used when both halves are configured; otherwise
    /// the default AWS credential chain applies. A custom `endpoint` targets
    /// S3-compatible services such as MinIO.
    pub async fn from_config(config: &ObjectStorageConfig) -> Result<Self, InfrastructureError> {
        if config.bucket.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "key_store.object_storage.bucket must be set".to_string(),
            ));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "tokenvault_key_store",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            "Object storage key store initialized"
        );

        Ok(Self::new(Client::from_conf(s3_config), config.bucket.clone()))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Creation time of an object, or `None` if it does not exist
    async fn head(&self, name: &str) -> Result<Option<DateTime<Utc>>, KeyStoreError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
        {
            Ok(output) => Ok(Some(created_at(name, output.last_modified())?)),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(None),
            Err(err) => Err(KeyStoreError::backend(DisplayErrorContext(&err))),
        }
    }

    async fn fetch(&self, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    KeyStoreError::NotFound {
                        name: name.to_string(),
                    }
                } else {
                    KeyStoreError::backend(DisplayErrorContext(&err))
                }
            })?;

        let created_at = created_at(name, output.last_modified())?;
        let bytes = output
            .body
            .collect()
            .await
            .map_err(KeyStoreError::backend)?
            .into_bytes();
        let key = pem::decode(name, &bytes)?;

        Ok(SigningKeyRecord::new(name, key, created_at))
    }
}

#[async_trait]
impl SecretKeyStore for ObjectStorageKeyStore {
    async fn write(&self, key: &SigningKey, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        check_name(name)?;
        if self.head(name).await?.is_some() {
            return Err(KeyStoreError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let pem = pem::encode(key)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(PEM_CONTENT_TYPE)
            .body(ByteStream::from(pem.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|err| KeyStoreError::backend(DisplayErrorContext(&err)))?;

        // The upload response carries no timestamp; the stored object's is authoritative
        let created_at = self.head(name).await?.ok_or_else(|| KeyStoreError::Backend {
            message: format!("object {} missing right after upload", name),
        })?;

        debug!(key = %name, bucket = %self.bucket, "Uploaded signing key object");
        Ok(SigningKeyRecord::new(name, key.clone(), created_at))
    }

    async fn read(&self, name: &str) -> Result<SigningKeyRecord, KeyStoreError> {
        check_name(name)?;
        self.fetch(name).await
    }

    async fn list(&self) -> Result<Vec<SigningKeyRecord>, KeyStoreError> {
        let mut names = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| KeyStoreError::backend(DisplayErrorContext(&err)))?;
            for object in page.contents() {
                match object.key() {
                    Some(name) if is_valid_key_name(name) => names.push(name.to_string()),
                    Some(name) => debug!(object = %name, "Skipping object with a non-key name"),
                    None => {}
                }
            }
        }
        names.sort();

        let mut keyring = Vec::with_capacity(names.len());
        for name in names {
            match self.fetch(&name).await {
                Ok(record) => keyring.push(record),
                // Pruned by a concurrent rotation since the listing
                Err(KeyStoreError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        sort_newest_first(&mut keyring);

        debug!(bucket = %self.bucket, keys = keyring.len(), "Listed signing keys");
        Ok(keyring)
    }

    async fn delete(&self, name: &str) -> Result<(), KeyStoreError> {
        check_name(name)?;
        // S3 deletes are idempotent; check first so absent keys are reported
        if self.head(name).await?.is_none() {
            return Err(KeyStoreError::NotFound {
                name: name.to_string(),
            });
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|err| KeyStoreError::backend(DisplayErrorContext(&err)))?;

        debug!(key = %name, bucket = %self.bucket, "Deleted signing key object");
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), KeyStoreError> {
    if is_valid_key_name(name) {
        Ok(())
    } else {
        Err(KeyStoreError::InvalidName {
            name: name.to_string(),
        })
    }
}

fn created_at(name: &str, last_modified: Option<&S3DateTime>) -> Result<DateTime<Utc>, KeyStoreError> {
    last_modified
        .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()))
        .ok_or_else(|| KeyStoreError::Backend {
            message: format!("object {} has no usable last-modified time", name),
        })
}
