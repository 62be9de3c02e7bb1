//! Application state - shared across all handlers.

use std::sync::Arc;

use qrhub_core::ports::{PasswordService, QrStorage, RateLimiter};
use qrhub_core::services::{AuthService, PublicUrls, QrCodeService};
use qrhub_infra::{
    Argon2PasswordService, FileSystemQrStorage, InMemoryCredentialStore, InMemoryQrStorage,
    InMemoryRateLimiter, JwtTokenService, PngQrRenderer,
};

use crate::config::{AppConfig, ConfigError, StorageBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub qr_codes: Arc<QrCodeService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Build the application state with the configured implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let urls = PublicUrls::new(&config.base_url, &config.download_folder).map_err(|e| {
            ConfigError::Invalid {
                name: "SERVER_BASE_URL/SERVER_DOWNLOAD_FOLDER",
                reason: e.to_string(),
            }
        })?;

        let storage: Arc<dyn QrStorage> = match &config.storage {
            StorageBackend::FileSystem(root) => Arc::new(
                FileSystemQrStorage::open(root)
                    .await
                    .map_err(|e| ConfigError::Storage(e.to_string()))?,
            ),
            StorageBackend::Memory => {
                tracing::warn!("QR_STORAGE=memory - images are lost on restart");
                Arc::new(InMemoryQrStorage::new())
            }
        };

        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let credentials = InMemoryCredentialStore::with_user(
            &*passwords,
            &config.admin.username,
            &config.admin.password,
        )
        .map_err(|e| ConfigError::Credentials(e.to_string()))?;
        tracing::info!(users = credentials.len(), "Credential store loaded");

        let auth = AuthService::new(
            Arc::new(credentials),
            passwords,
            Arc::new(JwtTokenService::new(config.jwt.clone())),
        );
        let qr_codes = QrCodeService::new(storage, Arc::new(PngQrRenderer::from_env()), urls);
        let rate_limiter = InMemoryRateLimiter::new(config.rate_limit.clone())
            .map_err(|e| ConfigError::RateLimit(e.to_string()))?;

        tracing::info!("Application state initialized");

        Ok(Self {
            auth: Arc::new(auth),
            qr_codes: Arc::new(qr_codes),
            rate_limiter: Arc::new(rate_limiter),
        })
    }
}
