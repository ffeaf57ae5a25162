use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;

/// Requests slower than this are logged at `warn` even when they succeed.
pub const SLOW_REQUEST: Duration = Duration::from_millis(1500);

/// Level of the `request_completed` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warn,
    Error,
}

fn severity(status: StatusCode, elapsed: Duration) -> Severity {
    if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() || elapsed >= SLOW_REQUEST {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Emits one `request_completed` event per request with method, path,
/// status, duration and trace id.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = TraceId::of(&req, "unknown");

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let elapsed = start.elapsed();
            let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
            let status_code = status.as_u16();

            match severity(status, elapsed) {
                Severity::Error => error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_ms, trace_id = %trace_id, "request_completed"),
                Severity::Warn => warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_ms, trace_id = %trace_id, "request_completed"),
                Severity::Info => info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_ms, trace_id = %trace_id, "request_completed"),
            }

            result
        })
    }
}
