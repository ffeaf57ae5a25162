//! Response envelope test helpers
//!
//! Assert the `{success, ...}` envelope without depending on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Local mirror of the backend's failure envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelopeLike {
    pub success: bool,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    #[serde(default)]
    pub errors: Vec<FieldErrorLike>,
}

#[derive(Debug, Deserialize)]
pub struct FieldErrorLike {
    pub field: String,
    pub message: String,
}

impl ErrorEnvelopeLike {
    /// True when a field-level error exists for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Assert that response parts form a valid failure envelope.
///
/// Checks the status, the `success: false` flag, the error code, and that
/// the `x-trace-id` header matches the body's `trace_id`.
pub fn assert_error_envelope_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) -> ErrorEnvelopeLike {
    assert_eq!(status, expected_status, "unexpected status");

    let envelope: ErrorEnvelopeLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body should be an error envelope ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert!(!envelope.success, "failure envelope must carry success=false");
    assert_eq!(
        envelope.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(envelope.code, expected_code);
    assert!(!envelope.message.is_empty(), "message must not be empty");

    envelope
}

/// Assert that a `ServiceResponse` is a failure envelope.
pub async fn assert_error_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
) -> ErrorEnvelopeLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_error_envelope_from_parts(status, &headers, &body, expected_code, expected_status)
}

/// Assert a success envelope and return the whole body.
pub async fn read_success(resp: ServiceResponse<BoxBody>, expected_status: StatusCode) -> Value {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "body should be JSON ({e}): {}",
            String::from_utf8_lossy(&body)
        )
    });
    assert_eq!(status, expected_status, "unexpected status, body: {json}");
    assert_eq!(json["success"], Value::Bool(true), "body: {json}");
    json
}

/// Assert a success envelope and return its `data` member.
pub async fn read_success_data(resp: ServiceResponse<BoxBody>, expected_status: StatusCode) -> Value {
    let mut json = read_success(resp, expected_status).await;
    json.get_mut("data")
        .map(Value::take)
        .expect("success envelope should carry data")
}
