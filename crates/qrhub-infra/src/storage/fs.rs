//! Filesystem artifact store - one PNG file per QR code.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use qrhub_core::domain::QrFilename;
use qrhub_core::ports::{QrStorage, StorageError};

/// Stores images as files in a single directory.
pub struct FileSystemQrStorage {
    root: PathBuf,
}

impl FileSystemQrStorage {
    /// Open (and create if needed) the storage directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", root.display(), e)))?;

        tracing::info!(root = %root.display(), "Filesystem QR storage ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, filename: &QrFilename) -> PathBuf {
        self.root.join(filename.as_str())
    }

    /// Scratch file in the same directory, never a valid QR filename.
    fn staging_path(&self) -> PathBuf {
        self.root.join(format!(".{}.tmp", Uuid::new_v4()))
    }
}

async fn write_staged(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn io_error(filename: &QrFilename, err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound(filename.to_string()),
        ErrorKind::AlreadyExists => StorageError::AlreadyExists(filename.to_string()),
        _ => StorageError::Io(format!("{}: {}", filename, err)),
    }
}

#[async_trait]
impl QrStorage for FileSystemQrStorage {
    async fn create(&self, filename: &QrFilename, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_of(filename);
        let staged = self.staging_path();

        if let Err(e) = write_staged(&staged, bytes).await {
            tracing::error!(path = %staged.display(), error = %e, "Failed to write QR image");
            let _ = fs::remove_file(&staged).await;
            return Err(io_error(filename, e));
        }

        // hard_link fails with AlreadyExists when the name is taken, and the
        // image only appears under its final name once fully written.
        let linked = fs::hard_link(&staged, &path).await;
        if let Err(e) = fs::remove_file(&staged).await {
            tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged QR image");
        }

        linked.map_err(|e| io_error(filename, e))
    }

    async fn read(&self, filename: &QrFilename) -> Result<Vec<u8>, StorageError> {
        fs::read(self.path_of(filename))
            .await
            .map_err(|e| io_error(filename, e))
    }

    async fn delete(&self, filename: &QrFilename) -> Result<(), StorageError> {
        fs::remove_file(self.path_of(filename))
            .await
            .map_err(|e| io_error(filename, e))
    }

    async fn exists(&self, filename: &QrFilename) -> Result<bool, StorageError> {
        fs::try_exists(self.path_of(filename))
            .await
            .map_err(|e| io_error(filename, e))
    }

    async fn list(&self) -> Result<Vec<QrFilename>, StorageError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", self.root.display(), e)))?;

        let mut filenames = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?
        {
            let name = entry.file_name();
            match name.to_str().and_then(QrFilename::parse) {
                Some(filename) => filenames.push(filename),
                None => tracing::debug!(file = ?name, "Skipping foreign file in QR directory"),
            }
        }

        Ok(filenames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use url::Url;

    fn filename(url: &str) -> QrFilename {
        QrFilename::for_target(&Url::parse(url).unwrap()).unwrap()
    }

    async fn temp_storage() -> FileSystemQrStorage {
        let root = std::env::temp_dir().join(format!("qrhub-test-{}", Uuid::new_v4()));
        FileSystemQrStorage::open(root).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_read_delete() {
        let storage = temp_storage().await;
        let name = filename("https://example.com");

        storage.create(&name, b"png-bytes").await.unwrap();
        assert!(storage.exists(&name).await.unwrap());
        assert_eq!(storage.read(&name).await.unwrap(), b"png-bytes");

        storage.delete(&name).await.unwrap();
        assert!(!storage.exists(&name).await.unwrap());
        assert!(matches!(
            storage.delete(&name).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.read(&name).await,
            Err(StorageError::NotFound(_))
        ));

        fs::remove_dir_all(storage.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_never_overwrites() {
        let storage = temp_storage().await;
        let name = filename("https://example.com");

        storage.create(&name, b"first").await.unwrap();
        assert!(matches!(
            storage.create(&name, b"second").await,
            Err(StorageError::AlreadyExists(_))
        ));
        assert_eq!(storage.read(&name).await.unwrap(), b"first");

        fs::remove_dir_all(storage.root()).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_has_single_winner() {
        let storage = Arc::new(temp_storage().await);
        let name = filename("https://race.example.com");

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let storage = storage.clone();
                let name = name.clone();
                tokio::spawn(async move { storage.create(&name, b"img").await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => created += 1,
                Err(StorageError::AlreadyExists(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);

        fs::remove_dir_all(storage.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_skips_foreign_files() {
        let storage = temp_storage().await;
        let name = filename("https://example.com");
        storage.create(&name, b"img").await.unwrap();
        fs::write(storage.root().join("notes.txt"), b"hi").await.unwrap();

        assert_eq!(storage.list().await.unwrap(), vec![name]);

        fs::remove_dir_all(storage.root()).await.unwrap();
    }

    async fn dir_entries(storage: &FileSystemQrStorage) -> Vec<String> {
        let mut entries = fs::read_dir(storage.root()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names
    }

    #[tokio::test]
    async fn test_create_leaves_only_the_final_file() {
        let storage = temp_storage().await;
        let name = filename("https://example.com");

        storage.create(&name, b"first").await.unwrap();
        assert!(storage.create(&name, b"second").await.is_err());

        assert_eq!(dir_entries(&storage).await, vec![name.to_string()]);
        assert_eq!(storage.read(&name).await.unwrap(), b"first");

        fs::remove_dir_all(storage.root()).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_partial_images() {
        let storage = Arc::new(temp_storage().await);
        let name = filename("https://big.example.com");
        let image = vec![0xAB_u8; 4 * 1024 * 1024];

        let writer = {
            let storage = storage.clone();
            let name = name.clone();
            let image = image.clone();
            tokio::spawn(async move { storage.create(&name, &image).await })
        };

        while !writer.is_finished() {
            match storage.read(&name).await {
                Ok(bytes) => assert_eq!(bytes.len(), image.len()),
                Err(StorageError::NotFound(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
            tokio::task::yield_now().await;
        }
        writer.await.unwrap().unwrap();
        assert_eq!(storage.read(&name).await.unwrap(), image);

        fs::remove_dir_all(storage.root()).await.unwrap();
    }
}
