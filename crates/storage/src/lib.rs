//! Object storage for card images.
//!
//! A small provider interface with two backends: S3 for production and
//! the local filesystem for development and tests. Keys follow the
//! `{user_email}/{card_id}/{side}.{ext}` convention from
//! `cardfolio_core::naming`.

use std::sync::Arc;

use async_trait::async_trait;

pub mod local;
pub mod s3;

pub use local::LocalProvider;
pub use s3::S3Provider;

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Backend-agnostic blob storage.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store `bytes` under `key`, overwriting any existing object.
    /// Returns the public URL of the stored object.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Delete the object under `key`. Deleting a missing object is not
    /// an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle used in application state.
pub type DynStorageProvider = Arc<dyn StorageProvider>;

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// `local` (default) or `s3`.
    pub backend: String,
    /// Root directory for the local backend (default: `./data/cards`).
    pub local_root: String,
    /// Bucket name for the S3 backend.
    pub s3_bucket: String,
    /// Base URL under which stored objects are publicly reachable.
    pub public_url: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `STORAGE_BACKEND`    | `local`                 |
    /// | `STORAGE_LOCAL_ROOT` | `./data/cards`          |
    /// | `S3_BUCKET`          | (required for `s3`)     |
    /// | `STORAGE_PUBLIC_URL` | `http://localhost:3000/media` |
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let local_root =
            std::env::var("STORAGE_LOCAL_ROOT").unwrap_or_else(|_| "./data/cards".into());
        let s3_bucket = std::env::var("S3_BUCKET").unwrap_or_default();
        let public_url = std::env::var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:3000/media".into());

        Self {
            backend,
            local_root,
            s3_bucket,
            public_url,
        }
    }
}

/// Build the configured provider.
///
/// # Panics
///
/// Panics when `STORAGE_BACKEND=s3` without an `S3_BUCKET`; storage
/// misconfiguration should fail at startup.
pub async fn build_provider(config: &StorageConfig) -> DynStorageProvider {
    match config.backend.as_str() {
        "s3" => {
            assert!(
                !config.s3_bucket.is_empty(),
                "S3_BUCKET must be set when STORAGE_BACKEND=s3"
            );
            Arc::new(S3Provider::from_env(config.s3_bucket.clone(), config.public_url.clone()).await)
        }
        _ => Arc::new(LocalProvider::new(
            config.local_root.clone().into(),
            config.public_url.clone(),
        )),
    }
}
