//! QR code lifecycle: create, list, download, delete.

use std::sync::Arc;

use url::Url;

use crate::domain::{Link, QrCode, QrFilename, QrSpec};
use crate::error::DomainError;
use crate::ports::{QrRenderer, QrStorage, RenderError, StorageError};

/// Public addresses that QR code links point at.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    api_base: Url,
    download_base: Url,
    download_folder: String,
}

impl PublicUrls {
    /// `base_url` is where the API is reachable from clients; images are
    /// served from `{base_url}/{download_folder}/`.
    pub fn new(base_url: &str, download_folder: &str) -> Result<Self, DomainError> {
        let mut api_base = Url::parse(base_url)
            .map_err(|e| DomainError::validation(format!("invalid base url '{}': {}", base_url, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(DomainError::validation(format!(
                "base url '{}' cannot carry paths",
                base_url
            )));
        }
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        let download_folder = download_folder.trim_matches('/').to_string();
        if download_folder.is_empty()
            || !download_folder
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(DomainError::validation(format!(
                "download folder '{}' must be a single path segment",
                download_folder
            )));
        }

        let download_base = api_base
            .join(&format!("{}/", download_folder))
            .map_err(|e| DomainError::validation(e.to_string()))?;

        Ok(Self {
            api_base,
            download_base,
            download_folder,
        })
    }

    pub fn download_folder(&self) -> &str {
        &self.download_folder
    }

    pub fn download_url(&self, filename: &QrFilename) -> Result<Url, DomainError> {
        self.download_base
            .join(filename.as_str())
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub fn resource_url(&self, filename: &QrFilename) -> Result<Url, DomainError> {
        self.api_base
            .join(&format!("qr-codes/{}", filename))
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// Creates, lists and removes QR code images.
pub struct QrCodeService {
    storage: Arc<dyn QrStorage>,
    renderer: Arc<dyn QrRenderer>,
    urls: PublicUrls,
}

impl QrCodeService {
    pub fn new(storage: Arc<dyn QrStorage>, renderer: Arc<dyn QrRenderer>, urls: PublicUrls) -> Self {
        Self {
            storage,
            renderer,
            urls,
        }
    }

    pub fn urls(&self) -> &PublicUrls {
        &self.urls
    }

    pub fn media_type(&self) -> &'static str {
        self.renderer.media_type()
    }

    /// Validate, render and store a new QR code.
    ///
    /// The filename depends only on the target URL, so a second request for
    /// the same URL is a [`DomainError::Duplicate`] whatever its colors.
    pub async fn create(
        &self,
        url: &str,
        fill_color: &str,
        back_color: &str,
        size: u32,
    ) -> Result<QrCode, DomainError> {
        let spec = QrSpec::parse(url, fill_color, back_color, size)?;
        let filename = spec.filename()?;

        if self.storage.exists(&filename).await.map_err(storage_error)? {
            return Err(duplicate(&filename));
        }

        let image = self.renderer.render(&spec).await.map_err(|e| match e {
            RenderError::DataTooLong(msg) => DomainError::Validation(msg),
            other => DomainError::Internal(other.to_string()),
        })?;

        match self.storage.create(&filename, &image).await {
            Ok(()) => {}
            // Lost a race with a concurrent create for the same URL.
            Err(StorageError::AlreadyExists(_)) => return Err(duplicate(&filename)),
            Err(e) => return Err(storage_error(e)),
        }

        tracing::info!(
            filename = %filename,
            target = %spec.target,
            fill = %spec.fill_color,
            back = %spec.back_color,
            size = spec.size,
            bytes = image.len(),
            "QR code created"
        );

        self.record(filename)
    }

    /// All stored QR codes, ordered by filename.
    pub async fn list(&self) -> Result<Vec<QrCode>, DomainError> {
        let mut filenames = self.storage.list().await.map_err(storage_error)?;
        filenames.sort();
        filenames.into_iter().map(|f| self.record(f)).collect()
    }

    /// Raw image bytes of a stored QR code.
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>, DomainError> {
        let filename =
            QrFilename::parse(filename).ok_or_else(|| DomainError::qr_code_not_found(filename))?;

        self.storage.read(&filename).await.map_err(|e| match e {
            StorageError::NotFound(_) => DomainError::qr_code_not_found(filename.as_str()),
            other => storage_error(other),
        })
    }

    /// Remove a stored QR code.
    pub async fn delete(&self, filename: &str) -> Result<(), DomainError> {
        let filename =
            QrFilename::parse(filename).ok_or_else(|| DomainError::qr_code_not_found(filename))?;

        self.storage.delete(&filename).await.map_err(|e| match e {
            StorageError::NotFound(_) => DomainError::qr_code_not_found(filename.as_str()),
            other => storage_error(other),
        })?;

        tracing::info!(filename = %filename, "QR code deleted");
        Ok(())
    }

    /// Number of stored QR codes; fails when the store is unreachable.
    pub async fn stored_count(&self) -> Result<usize, DomainError> {
        Ok(self.storage.list().await.map_err(storage_error)?.len())
    }

    fn record(&self, filename: QrFilename) -> Result<QrCode, DomainError> {
        let qr_code_url = self.urls.download_url(&filename)?;
        let links = vec![
            Link::new("view", qr_code_url.as_str(), "GET", self.media_type()),
            Link::new(
                "delete",
                self.urls.resource_url(&filename)?.as_str(),
                "DELETE",
                "application/json",
            ),
        ];

        Ok(QrCode {
            filename,
            qr_code_url,
            links,
        })
    }
}

fn duplicate(filename: &QrFilename) -> DomainError {
    DomainError::Duplicate(format!("QR code {} already exists", filename))
}

fn storage_error(err: StorageError) -> DomainError {
    DomainError::Internal(err.to_string())
}
