//! Remote object store client built on Apache OpenDAL.
//!
//! One [`RemoteStore`] is constructed at startup from explicit configuration
//! and shared for the lifetime of the process. TLS verification is left at
//! the client default (on); trust configuration belongs to the process trust
//! store, not this module.

use std::path::Path;

use bytes::Bytes;
use opendal::{Operator, services};

use super::config::{RemoteStoreConfig, StorageProvider};
use super::error::StorageError;
use super::local;

/// Prefix all remote object keys are namespaced under.
pub const PUBLIC_PREFIX: &str = "public/";

/// An object written to the remote store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Full object key, including the `public/` prefix.
    pub key: String,
    /// Provider URL of the object.
    pub url: String,
    /// Public-facing URL derived from the configured domain.
    pub secure_url: String,
    /// Content hash reported by the provider, with surrounding quotes
    /// stripped. Empty when the backend reports none.
    pub etag: String,
}

/// Client for an S3-compatible object store.
pub struct RemoteStore {
    operator: Operator,
    config: RemoteStoreConfig,
}

impl RemoteStore {
    /// Create a new remote store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: RemoteStoreConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Write an object directly from memory, without touching local disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<StoredObject, StorageError> {
        let meta = self.operator.write(key, data).await?;
        Ok(self.stored_object(key, meta.etag()))
    }

    /// Write an object from a file already staged on local disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the storage write
    /// fails.
    pub async fn put_file(&self, key: &str, path: &Path) -> Result<StoredObject, StorageError> {
        let data = tokio::fs::read(path).await?;
        self.put(key, Bytes::from(data)).await
    }

    /// Provider URL for an object (path-style for S3).
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        match &self.config.provider {
            StorageProvider::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            StorageProvider::LocalFs { root } => format!("{}/{key}", root.display()),
        }
    }

    /// Public-facing URL for an object: the configured domain joined with
    /// the key after stripping the `public/` prefix.
    #[must_use]
    pub fn secure_url(&self, key: &str) -> String {
        let cleaned = key.strip_prefix(PUBLIC_PREFIX).unwrap_or(key);
        format!(
            "{}/{cleaned}",
            self.config.public_domain.trim_end_matches('/')
        )
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    fn stored_object(&self, key: &str, etag: Option<&str>) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            url: self.object_url(key),
            secure_url: self.secure_url(key),
            etag: dequote(etag.unwrap_or_default()).to_string(),
        }
    }
}

/// Remote key for the streaming path: `public/<millisecond-timestamp>-<name>`.
#[must_use]
pub fn timestamped_key(original_name: &str) -> String {
    format!("{PUBLIC_PREFIX}{}", local::timestamped_name(original_name))
}

/// Remote key for the staged path: `public/<basename>`, deliberately without
/// a timestamp. Repeated uploads of a same-named file overwrite the object.
#[must_use]
pub fn named_key(original_name: &str) -> String {
    format!("{PUBLIC_PREFIX}{}", local::base_name(original_name))
}

/// Strip the surrounding quote characters providers put around ETags.
#[must_use]
pub fn dequote(etag: &str) -> &str {
    let etag = etag.strip_prefix('"').unwrap_or(etag);
    etag.strip_suffix('"').unwrap_or(etag)
}
