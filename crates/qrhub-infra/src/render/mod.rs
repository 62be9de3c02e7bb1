//! QR image renderers.

mod png;

pub use png::PngQrRenderer;
