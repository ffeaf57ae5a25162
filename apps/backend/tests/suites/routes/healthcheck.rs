use actix_web::http::StatusCode;
use actix_web::test;
use backend::AppError;
use serde_json::Value;

use crate::support::test_state::build_state_without_db;
use crate::support::{build_test_state, create_test_app};

// No SharedTxn here: the health probe needs the pool's only connection.
#[actix_web::test]
async fn test_health_reports_db_and_migrations() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert!(body["migrations"].as_str().unwrap().starts_with('m'));
    assert!(!body["app_version"].as_str().unwrap().is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_health_stays_up_without_db() -> Result<(), AppError> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].as_str().is_some());
    assert_eq!(body["migrations"], "unknown");
    Ok(())
}
