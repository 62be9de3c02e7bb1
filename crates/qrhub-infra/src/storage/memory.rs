//! In-memory artifact store - used in tests and when `QR_STORAGE=memory`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use qrhub_core::domain::QrFilename;
use qrhub_core::ports::{QrStorage, StorageError};

/// In-memory image store using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryQrStorage {
    store: RwLock<HashMap<QrFilename, Vec<u8>>>,
}

impl InMemoryQrStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryQrStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QrStorage for InMemoryQrStorage {
    async fn create(&self, filename: &QrFilename, bytes: &[u8]) -> Result<(), StorageError> {
        // Check and insert under one write lock.
        let mut store = self.store.write().await;
        match store.entry(filename.clone()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists(filename.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(bytes.to_vec());
                Ok(())
            }
        }
    }

    async fn read(&self, filename: &QrFilename) -> Result<Vec<u8>, StorageError> {
        let store = self.store.read().await;
        store
            .get(filename)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))
    }

    async fn delete(&self, filename: &QrFilename) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store
            .remove(filename)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))
    }

    async fn exists(&self, filename: &QrFilename) -> Result<bool, StorageError> {
        Ok(self.store.read().await.contains_key(filename))
    }

    async fn list(&self) -> Result<Vec<QrFilename>, StorageError> {
        Ok(self.store.read().await.keys().cloned().collect())
    }
}
