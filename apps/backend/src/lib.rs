#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::app::Config;
pub use db::txn::{with_txn, SharedTxn};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{AuthToken, CurrentAdmin, MaybeAdmin, ValidatedJson};
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::rate_limit::RateLimits;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
