//! QR image rendering port.

use async_trait::async_trait;

use crate::domain::QrSpec;

/// Turns a validated [`QrSpec`] into encoded image bytes.
#[async_trait]
pub trait QrRenderer: Send + Sync {
    /// Render `spec` to an encoded image.
    async fn render(&self, spec: &QrSpec) -> Result<Vec<u8>, RenderError>;

    /// MIME type of the produced images.
    fn media_type(&self) -> &'static str;
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Data does not fit in a QR code: {0}")]
    DataTooLong(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Render task failed: {0}")]
    Task(String),
}
