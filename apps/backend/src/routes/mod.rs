//! HTTP route table.
//!
//! `configure` is shared by `main.rs` and the integration tests, so both
//! serve the same paths with the same per-route rate limits.

use actix_web::{web, HttpRequest, HttpResponse, Resource};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::rate_limit::RateLimits;

pub mod articles;
pub mod auth;
pub mod cart;
pub mod contacts;
pub mod content;
pub mod domain_contacts;
pub mod equipment;
pub mod health;

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "query string rejected");
        AppError::bad_request(ErrorCode::InvalidQuery, "Tham số truy vấn không hợp lệ").into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "path parameter rejected");
        AppError::bad_request(ErrorCode::InvalidPath, "Đường dẫn không hợp lệ").into()
    })
}

/// Fallback for unmatched paths.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("Không tìm thấy đường dẫn {}", req.path()),
    ))
}

/// Known path, unsupported method.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::method_not_allowed(
        req.method().as_str(),
        req.path(),
    ))
}

/// `web::resource` whose wrong-method requests get the failure envelope.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// Register every route. `limits` is shared across workers.
pub fn configure(limits: RateLimits) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(query_config()).app_data(path_config());

        // /health
        cfg.configure(health::configure_routes);

        // /api/auth/**
        cfg.service(web::scope("/api/auth").configure(|c| auth::configure_routes(c, &limits)));

        // /api/contacts/**
        cfg.service(
            web::scope("/api/contacts").configure(|c| contacts::configure_routes(c, &limits)),
        );

        // /api/domain-contacts/**
        cfg.service(
            web::scope("/api/domain-contacts")
                .configure(|c| domain_contacts::configure_routes(c, &limits)),
        );

        // /api/articles/**
        cfg.service(web::scope("/api/articles").configure(articles::configure_routes));

        // /api/equipment/**
        cfg.service(web::scope("/api/equipment").configure(equipment::configure_routes));

        // /api/cart/**
        cfg.service(web::scope("/api/cart").configure(cart::configure_routes));

        // /api/content/**
        cfg.service(web::scope("/api/content").configure(content::configure_routes));

        cfg.default_service(web::to(not_found));
    }
}
