//! Public image download.

use actix_web::{HttpResponse, http::header, web};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /{download_folder}/{filename}
pub async fn download(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let bytes = state.qr_codes.download(&filename).await?;

    Ok(HttpResponse::Ok()
        .content_type(state.qr_codes.media_type())
        // The name is derived from the target URL, so the content never changes.
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(bytes))
}
