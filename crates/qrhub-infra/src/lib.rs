//! # QRHub Infrastructure
//!
//! Concrete implementations of the ports defined in `qrhub-core`.
//! This crate contains token signing, password hashing, image storage,
//! QR rendering and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No rate limiting
//! - `rate-limit` - Rate limiting via governor

pub mod auth;
pub mod render;
pub mod storage;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::{Argon2PasswordService, InMemoryCredentialStore, JwtConfig, JwtTokenService};
pub use render::PngQrRenderer;
pub use storage::{FileSystemQrStorage, InMemoryQrStorage};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
