//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Form body of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

fn default_fill_color() -> String {
    "red".to_string()
}

fn default_back_color() -> String {
    "white".to_string()
}

fn default_size() -> u32 {
    10
}

/// JSON body of `POST /qr-codes/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeRequest {
    pub url: String,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_back_color")]
    pub back_color: String,
    #[serde(default = "default_size")]
    pub size: u32,
}

/// Hypermedia link attached to a QR code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub rel: String,
    pub href: String,
    pub action: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// A QR code as returned by creation and listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeResponse {
    pub message: String,
    pub qr_code_url: String,
    pub links: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_request_defaults() {
        let req: QrCodeRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert_eq!(req.fill_color, "red");
        assert_eq!(req.back_color, "white");
        assert_eq!(req.size, 10);
    }

    #[test]
    fn test_link_serializes_type_key() {
        let link = LinkResponse {
            rel: "view".to_string(),
            href: "http://localhost/downloads/x.png".to_string(),
            action: "GET".to_string(),
            media_type: "image/png".to_string(),
        };

        let value = serde_json::to_value(&link).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["action", "href", "rel", "type"]);
    }
}
