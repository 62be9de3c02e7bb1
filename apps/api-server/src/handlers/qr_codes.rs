//! QR code creation, listing and deletion. All routes require a bearer token.

use actix_web::{HttpResponse, web};

use qrhub_core::domain::QrCode;
use qrhub_shared::dto::{LinkResponse, QrCodeRequest, QrCodeResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

const CREATED_MESSAGE: &str = "QR code created successfully.";
const LISTED_MESSAGE: &str = "QR code available";

fn to_response(qr: QrCode, message: &str) -> QrCodeResponse {
    QrCodeResponse {
        message: message.to_string(),
        qr_code_url: qr.qr_code_url.to_string(),
        links: qr
            .links
            .into_iter()
            .map(|link| LinkResponse {
                rel: link.rel,
                href: link.href,
                action: link.action,
                media_type: link.media_type,
            })
            .collect(),
    }
}

/// POST /qr-codes/
pub async fn create(
    identity: Identity,
    request_id: RequestId,
    state: web::Data<AppState>,
    body: web::Json<QrCodeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::debug!(
        user = %identity.username,
        request_id = %request_id.as_str(),
        url = %req.url,
        "Creating QR code"
    );

    let qr = state
        .qr_codes
        .create(&req.url, &req.fill_color, &req.back_color, req.size)
        .await?;

    Ok(HttpResponse::Created().json(to_response(qr, CREATED_MESSAGE)))
}

/// GET /qr-codes/
pub async fn list(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let codes = state.qr_codes.list().await?;
    tracing::debug!(user = %identity.username, count = codes.len(), "Listing QR codes");

    let body: Vec<QrCodeResponse> = codes
        .into_iter()
        .map(|qr| to_response(qr, LISTED_MESSAGE))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /qr-codes/{filename}
pub async fn delete(
    identity: Identity,
    request_id: RequestId,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    tracing::debug!(
        user = %identity.username,
        request_id = %request_id.as_str(),
        filename = %filename,
        "Deleting QR code"
    );

    state.qr_codes.delete(&filename).await?;

    Ok(HttpResponse::NoContent().finish())
}
