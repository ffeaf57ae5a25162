// Security headers on every response; `no-store` only on API and health paths.

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend::AppError;

use crate::support::create_test_app;
use crate::support::test_state::build_state_without_db;

const EXPECTED: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
];

async fn robots() -> HttpResponse {
    HttpResponse::Ok().body("User-agent: *")
}

#[actix_web::test]
async fn test_api_responses_carry_security_headers_and_no_store() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    // Error responses included.
    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let headers = resp.headers();
    for (name, value) in EXPECTED {
        assert_eq!(
            headers.get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "{name} should be set"
        );
    }
    assert!(headers.contains_key("strict-transport-security"));
    assert!(headers.contains_key("permissions-policy"));
    assert_eq!(
        headers.get("cache-control").and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    Ok(())
}

#[actix_web::test]
async fn test_non_api_paths_are_cacheable() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/robots.txt", web::get().to(robots));
        })
        .build()
        .await?;

    let req = test::TestRequest::get().uri("/robots.txt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert!(resp.headers().get("cache-control").is_none());
    Ok(())
}
