//! QR code records and the rendering request behind them.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use url::Url;

use super::Color;
use crate::error::DomainError;

pub const PNG_EXTENSION: &str = ".png";
pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 50;
const MAX_FILENAME_LEN: usize = 255;

/// Validated rendering request.
#[derive(Debug, Clone, PartialEq)]
pub struct QrSpec {
    pub target: Url,
    pub fill_color: Color,
    pub back_color: Color,
    /// Pixel edge length of one QR module.
    pub size: u32,
}

impl QrSpec {
    /// Validate raw request fields.
    pub fn parse(url: &str, fill_color: &str, back_color: &str, size: u32) -> Result<Self, DomainError> {
        let target = parse_target(url)?;

        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(DomainError::validation(format!(
                "size must be between {} and {}",
                MIN_SIZE, MAX_SIZE
            )));
        }

        Ok(Self {
            target,
            fill_color: fill_color.parse()?,
            back_color: back_color.parse()?,
            size,
        })
    }

    pub fn filename(&self) -> Result<QrFilename, DomainError> {
        QrFilename::for_target(&self.target)
    }
}

fn parse_target(raw: &str) -> Result<Url, DomainError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| DomainError::validation(format!("invalid url '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::validation(format!(
            "url scheme must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::validation("url must have a host"));
    }

    Ok(url)
}

/// Storage key of a QR code image.
///
/// The stem is the unpadded URL-safe base64 of the target URL, so the same
/// target always maps to the same file and the name never contains `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QrFilename(String);

impl QrFilename {
    pub fn for_target(target: &Url) -> Result<Self, DomainError> {
        let name = format!("{}{}", URL_SAFE_NO_PAD.encode(target.as_str()), PNG_EXTENSION);
        if name.len() > MAX_FILENAME_LEN {
            return Err(DomainError::validation("url is too long to be stored"));
        }
        Ok(Self(name))
    }

    /// Accepts only names this type could have produced.
    pub fn parse(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(PNG_EXTENSION)?;
        if stem.is_empty() || name.len() > MAX_FILENAME_LEN {
            return None;
        }
        let decoded = URL_SAFE_NO_PAD.decode(stem).ok()?;
        let target = String::from_utf8(decoded).ok()?;
        Url::parse(&target).ok()?;
        Some(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the target URL back out of the name.
    pub fn target(&self) -> Option<Url> {
        let stem = self.0.strip_suffix(PNG_EXTENSION)?;
        let decoded = URL_SAFE_NO_PAD.decode(stem).ok()?;
        Url::parse(std::str::from_utf8(&decoded).ok()?).ok()
    }
}

impl fmt::Display for QrFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hypermedia affordance attached to a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub action: String,
    pub media_type: String,
}

impl Link {
    pub fn new(
        rel: impl Into<String>,
        href: impl Into<String>,
        action: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            action: action.into(),
            media_type: media_type.into(),
        }
    }
}

/// QR code entity - a stored image and how to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCode {
    pub filename: QrFilename,
    pub qr_code_url: Url,
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec() {
        let spec = QrSpec::parse("https://example.com", "red", "white", 10).unwrap();
        assert_eq!(spec.target.as_str(), "https://example.com/");
        assert_eq!(spec.fill_color, Color::rgb(255, 0, 0));
        assert_eq!(spec.back_color, Color::rgb(255, 255, 255));
        assert_eq!(spec.size, 10);
    }

    #[test]
    fn test_rejects_relative_and_non_http_urls() {
        for bad in ["example.com", "/path/only", "ftp://example.com", "mailto:a@b.c", "not a url"] {
            let result = QrSpec::parse(bad, "red", "white", 10);
            assert!(matches!(result, Err(DomainError::Validation(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_rejects_out_of_range_size() {
        assert!(QrSpec::parse("https://example.com", "red", "white", 0).is_err());
        assert!(QrSpec::parse("https://example.com", "red", "white", MAX_SIZE + 1).is_err());
        assert!(QrSpec::parse("https://example.com", "red", "white", MAX_SIZE).is_ok());
    }

    #[test]
    fn test_filename_is_deterministic_and_reversible() {
        let spec = QrSpec::parse("https://example.com/a?b=c", "red", "white", 10).unwrap();
        let first = spec.filename().unwrap();
        let second = QrFilename::for_target(&spec.target).unwrap();

        assert_eq!(first, second);
        assert!(first.as_str().ends_with(".png"));
        assert!(!first.as_str().contains('/'));
        assert_eq!(first.target().unwrap(), spec.target);
        assert_eq!(QrFilename::parse(first.as_str()), Some(first));
    }

    #[test]
    fn test_filename_rejects_foreign_names() {
        for bad in ["", ".png", "../etc/passwd", "hello.txt", "!!!.png", "aGVsbG8.png"] {
            assert_eq!(QrFilename::parse(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_filename_rejects_overlong_urls() {
        let long = format!("https://example.com/{}", "a".repeat(300));
        let spec = QrSpec::parse(&long, "red", "white", 10).unwrap();
        assert!(matches!(spec.filename(), Err(DomainError::Validation(_))));
    }
}
