// Per-IP limits on the login and lead-form endpoints.

use std::net::SocketAddr;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::middleware::rate_limit::{RateLimits, LEAD_LIMIT, LOGIN_LIMIT};
use backend::AppError;
use serde_json::json;

use crate::common::assert_failure;
use crate::support::create_test_app;
use crate::support::test_state::build_state_without_db;

fn peer(ip: &str) -> SocketAddr {
    format!("{ip}:40000").parse().unwrap()
}

#[actix_web::test]
async fn test_login_is_limited_per_ip() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state)
        .with_rate_limits(RateLimits::enabled())
        .build()
        .await?;

    for i in 0..LOGIN_LIMIT {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer("203.0.113.7"))
            .set_json(json!({"username": "admin", "password": "guess"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "attempt {} should reach the handler",
            i + 1
        );
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer("203.0.113.7"))
        .set_json(json!({"username": "admin", "password": "admin-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), "0");
    let err = assert_failure(resp, "RATE_LIMITED", StatusCode::TOO_MANY_REQUESTS).await;
    assert!(err.message.contains("quá nhiều yêu cầu"));

    // Another client still gets through.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer("198.51.100.20"))
        .set_json(json!({"username": "admin", "password": "admin-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn test_lead_forms_are_limited_but_admin_reads_are_not() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state)
        .with_rate_limits(RateLimits::enabled())
        .build()
        .await?;

    // Malformed bodies are rejected before any DB access but still count.
    for _ in 0..LEAD_LIMIT {
        let req = test::TestRequest::post()
            .uri("/api/contacts")
            .peer_addr(peer("203.0.113.9"))
            .insert_header(("content-type", "application/json"))
            .set_payload("{")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .peer_addr(peer("203.0.113.9"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_failure(resp, "RATE_LIMITED", StatusCode::TOO_MANY_REQUESTS).await;

    // Each endpoint has its own budget.
    let req = test::TestRequest::post()
        .uri("/api/domain-contacts")
        .peer_addr(peer("203.0.113.9"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Reads on the same path are not limited.
    let req = test::TestRequest::get()
        .uri("/api/contacts")
        .peer_addr(peer("203.0.113.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[actix_web::test]
async fn test_disabled_limits_never_reject() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for _ in 0..(LOGIN_LIMIT + 3) {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer("203.0.113.7"))
            .set_json(json!({"username": "admin", "password": "guess"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(!resp.headers().contains_key("x-ratelimit-remaining"));
    }
    Ok(())
}
