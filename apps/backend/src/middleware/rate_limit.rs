//! Per-IP rate limits for the endpoints anonymous visitors can hammer.
//! Counters are keyed by client IP and path, so each endpoint has its own budget.
//!
//! - Admin login: 5 requests per minute per IP
//! - Public lead forms (contacts, domain contacts): 10 requests per minute per IP

use std::time::Duration;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::{
    SimpleInputFunctionBuilder, SimpleInputFuture, SimpleOutput,
};
use actix_extensible_rate_limit::{HeaderCompatibleOutput, RateLimiter};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Condition;
use actix_web::{HttpResponse, ResponseError};
use tracing::warn;

use crate::error::AppError;

pub const LOGIN_LIMIT: u64 = 5;
pub const LEAD_LIMIT: u64 = 10;
const WINDOW: Duration = Duration::from_secs(60);

pub fn auth_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, LOGIN_LIMIT)
        .real_ip_key()
        .path_key()
}

pub fn lead_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, LEAD_LIMIT)
        .real_ip_key()
        .path_key()
}

/// Denied requests get the usual failure envelope plus the
/// `x-ratelimit-*` headers allowed responses carry.
fn rate_limited_response(output: &SimpleOutput) -> HttpResponse {
    let retry_after = output.seconds_until_reset();
    warn!(limit = output.limit(), retry_after, "rate limit exceeded");

    let mut resp = AppError::rate_limited(retry_after).error_response();
    let headers = resp.headers_mut();
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(output.limit()),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(output.remaining()),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-reset"),
        HeaderValue::from(retry_after),
    );
    resp
}

/// Limiter middleware for one resource, a no-op when `limits` is disabled.
pub fn limiter(
    limits: &RateLimits,
    input: SimpleInputFunctionBuilder,
) -> Condition<
    RateLimiter<
        InMemoryBackend,
        SimpleOutput,
        impl Fn(&ServiceRequest) -> SimpleInputFuture + 'static,
    >,
> {
    Condition::new(
        limits.enabled,
        RateLimiter::builder(limits.backend.clone(), input.build())
            .add_headers()
            .request_denied_response(rate_limited_response)
            .build(),
    )
}

/// Shared counter store plus an on/off switch.
///
/// Build it once, outside the `HttpServer` factory, so every worker counts
/// against the same store.
#[derive(Clone)]
pub struct RateLimits {
    pub backend: InMemoryBackend,
    pub enabled: bool,
}

impl RateLimits {
    pub fn enabled() -> Self {
        Self {
            backend: InMemoryBackend::builder().build(),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            backend: InMemoryBackend::builder().build(),
            enabled: false,
        }
    }
}
