//! HTTP handlers and route configuration.

mod auth;
mod downloads;
mod health;
mod qr_codes;

use actix_web::web;

use crate::middleware::error::invalid_input;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Register application state, extractor settings and all routes.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let download_route = format!("/{}/{{filename}}", state.qr_codes.urls().download_folder());
        let limiter = state.rate_limiter.clone();

        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| invalid_input(err)))
            .app_data(web::FormConfig::default().error_handler(|err, _req| invalid_input(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _req| invalid_input(err)))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/token")
                    .wrap(RateLimitMiddleware::new(limiter))
                    .route(web::post().to(auth::login)),
            )
            .route(&download_route, web::get().to(downloads::download))
            // Protected routes
            .service(
                web::resource(vec!["/qr-codes", "/qr-codes/"])
                    .route(web::get().to(qr_codes::list))
                    .route(web::post().to(qr_codes::create)),
            )
            .route("/qr-codes/{filename}", web::delete().to(qr_codes::delete));
    }
}
