//! Use cases - orchestration of domain rules over ports.

mod auth;
mod qr_code;

pub use auth::{AuthService, IssuedToken, TOKEN_TYPE};
pub use qr_code::{PublicUrls, QrCodeService};
