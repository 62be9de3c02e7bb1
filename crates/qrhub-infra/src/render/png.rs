//! PNG rendering with the `qrcode` and `image` crates.

use std::io::Cursor;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use qrhub_core::domain::QrSpec;
use qrhub_core::ports::{QrRenderer, RenderError};

/// Renders QR codes as RGB PNG images with a four-module quiet zone.
pub struct PngQrRenderer {
    ec_level: EcLevel,
}

impl PngQrRenderer {
    pub fn new() -> Self {
        Self {
            ec_level: EcLevel::M,
        }
    }

    /// Reads `QR_ERROR_CORRECTION` (`L`, `M`, `Q` or `H`; default `M`).
    pub fn from_env() -> Self {
        let ec_level = match std::env::var("QR_ERROR_CORRECTION")
            .map(|v| v.trim().to_ascii_uppercase())
            .as_deref()
        {
            Ok("L") => EcLevel::L,
            Ok("Q") => EcLevel::Q,
            Ok("H") => EcLevel::H,
            Ok("M") | Err(_) => EcLevel::M,
            Ok(other) => {
                tracing::warn!(value = %other, "Unknown QR_ERROR_CORRECTION, using M");
                EcLevel::M
            }
        };
        Self { ec_level }
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_png(spec: &QrSpec, ec_level: EcLevel) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(spec.target.as_str(), ec_level).map_err(|e| {
        match e {
            QrError::DataTooLong => RenderError::DataTooLong(format!(
                "url of {} bytes does not fit in a QR code",
                spec.target.as_str().len()
            )),
            other => RenderError::Encoding(other.to_string()),
        }
    })?;

    let image = code
        .render::<Rgb<u8>>()
        .dark_color(Rgb(spec.fill_color.to_array()))
        .light_color(Rgb(spec.back_color.to_array()))
        .quiet_zone(true)
        .module_dimensions(spec.size, spec.size)
        .build();

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| RenderError::Encoding(e.to_string()))?;

    Ok(buf.into_inner())
}

#[async_trait]
impl QrRenderer for PngQrRenderer {
    async fn render(&self, spec: &QrSpec) -> Result<Vec<u8>, RenderError> {
        let spec = spec.clone();
        let ec_level = self.ec_level;

        tokio::task::spawn_blocking(move || render_png(&spec, ec_level))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    fn media_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET_ZONE_MODULES: u32 = 4;

    #[tokio::test]
    async fn test_render_png_with_colors_and_size() {
        let spec = QrSpec::parse("https://example.com", "red", "white", 10).unwrap();

        let bytes = PngQrRenderer::new().render(&spec).await.unwrap();
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8();

        assert_eq!(image.width(), image.height());
        assert_eq!(image.width() % 10, 0);
        let modules = image.width() / 10 - 2 * QUIET_ZONE_MODULES;
        assert!(modules >= 21 && (modules - 21) % 4 == 0, "odd module count {modules}");

        // Quiet zone is background, the finder pattern corner is foreground.
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        let corner = QUIET_ZONE_MODULES * 10;
        assert_eq!(image.get_pixel(corner, corner), &Rgb([255, 0, 0]));
    }

    #[tokio::test]
    async fn test_render_rejects_oversized_data() {
        let long = format!("https://example.com/{}", "x".repeat(5000));
        let spec = QrSpec::parse(&long, "black", "white", 1).unwrap();

        let result = PngQrRenderer::new().render(&spec).await;
        assert!(matches!(result, Err(RenderError::DataTooLong(_))));
    }
}
