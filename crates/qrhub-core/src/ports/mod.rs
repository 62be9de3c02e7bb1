//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod render;
mod storage;

pub use auth::{AuthError, CredentialStore, PasswordService, TokenClaims, TokenService};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use render::{QrRenderer, RenderError};
pub use storage::{QrStorage, StorageError};
