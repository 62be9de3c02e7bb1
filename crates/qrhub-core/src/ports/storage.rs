//! Artifact store port - where rendered QR images live.

use async_trait::async_trait;

use crate::domain::QrFilename;

/// Storage for rendered QR code images, keyed by filename.
#[async_trait]
pub trait QrStorage: Send + Sync {
    /// Store `bytes` under `filename` only if nothing is stored there yet.
    ///
    /// Concurrent calls for the same name must let exactly one succeed; the
    /// others get [`StorageError::AlreadyExists`].
    async fn create(&self, filename: &QrFilename, bytes: &[u8]) -> Result<(), StorageError>;

    /// Read a stored image.
    async fn read(&self, filename: &QrFilename) -> Result<Vec<u8>, StorageError>;

    /// Remove a stored image.
    async fn delete(&self, filename: &QrFilename) -> Result<(), StorageError>;

    /// Check if an image exists.
    async fn exists(&self, filename: &QrFilename) -> Result<bool, StorageError>;

    /// All stored QR code filenames. Foreign files are skipped.
    async fn list(&self) -> Result<Vec<QrFilename>, StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}
