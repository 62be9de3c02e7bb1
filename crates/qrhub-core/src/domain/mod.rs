//! Domain entities - the core business objects.

mod color;
mod credential;
mod qr_code;

pub use color::Color;
pub use credential::Credential;
pub use qr_code::{Link, MAX_SIZE, MIN_SIZE, PNG_EXTENSION, QrCode, QrFilename, QrSpec};
