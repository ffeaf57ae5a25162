#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use backend::db::txn_policy::{set_txn_policy, TxnPolicy};
use backend_test_support::envelope::{assert_error_envelope, ErrorEnvelopeLike};

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Rollback unless the binary runs with `SITE_TXN_POLICY=commit`.
#[ctor::ctor]
fn init_txn_policy() {
    let raw = std::env::var("SITE_TXN_POLICY").ok();
    set_txn_policy(TxnPolicy::from_setting(raw.as_deref()));
}

/// Failure envelope plus the HTTP header rules from `AppError::error_response`:
/// 401 carries `WWW-Authenticate: Bearer`, 503 carries `Retry-After`,
/// everything else carries neither.
pub async fn assert_failure(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
) -> ErrorEnvelopeLike {
    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "failure bodies are JSON (got {content_type})"
    );

    match expected_status {
        StatusCode::UNAUTHORIZED => {
            assert_eq!(
                headers
                    .get("www-authenticate")
                    .and_then(|v| v.to_str().ok()),
                Some("Bearer")
            );
            assert!(headers.get("retry-after").is_none());
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
            assert!(headers.get("retry-after").is_some());
            assert!(headers.get("www-authenticate").is_none());
        }
        _ => {
            assert!(headers.get("www-authenticate").is_none());
            assert!(headers.get("retry-after").is_none());
        }
    }

    assert_error_envelope(resp, expected_code, expected_status).await
}
