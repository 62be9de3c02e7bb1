//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_codes: Option<usize>,
}

/// Health check endpoint - returns server status and artifact store reachability.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let stored = state.qr_codes.stored_count().await;
    if let Err(e) = &stored {
        tracing::error!(error = %e, "Health check: QR storage unavailable");
    }

    let response = HealthResponse {
        status: if stored.is_ok() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        qr_codes: stored.ok(),
    };

    if response.qr_codes.is_some() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
