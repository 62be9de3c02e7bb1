//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;

use qrhub_infra::{JwtConfig, RateLimitConfig};

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Storage initialization failed: {0}")]
    Storage(String),

    #[error("Credential setup failed: {0}")]
    Credentials(String),

    #[error("Rate limiter setup failed: {0}")]
    RateLimit(String),
}

/// Where QR code images are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    FileSystem(PathBuf),
    Memory,
}

/// The single account allowed to log in.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Public origin (and optional path prefix) used in returned links.
    pub base_url: String,
    /// Path segment under which images are downloadable.
    pub download_folder: String,
    pub storage: StorageBackend,
    pub admin: AdminCredentials,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}': {}", raw, e),
            })?,
            Err(_) => 8080,
        };

        let storage = match env::var("QR_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("fs") | Err(_) => StorageBackend::FileSystem(
                env::var("QR_DIRECTORY")
                    .unwrap_or_else(|_| "./qr_codes".to_string())
                    .into(),
            ),
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "QR_STORAGE",
                    reason: format!("'{}' (expected 'fs' or 'memory')", other),
                });
            }
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            base_url: env::var("SERVER_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            download_folder: env::var("SERVER_DOWNLOAD_FOLDER")
                .unwrap_or_else(|_| "downloads".to_string()),
            storage,
            admin: AdminCredentials {
                username: env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
                password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "secret".to_string()),
            },
            jwt: JwtConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        })
    }
}
