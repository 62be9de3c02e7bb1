//! Token issuance.

use actix_web::{HttpResponse, web};

use qrhub_shared::dto::{LoginForm, TokenResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /token
///
/// Form-encoded `username` and `password`, as OAuth2 password-grant clients send them.
pub async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let token = state.auth.login(&form.username, &form.password).await?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: token.access_token,
        token_type: token.token_type.to_string(),
        expires_in: token.expires_in,
    }))
}
