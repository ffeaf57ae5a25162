use actix_web::http::StatusCode;
use actix_web::test;
use backend::AppError;
use backend_test_support::envelope::{read_success, read_success_data};
use serde_json::json;

use crate::common::assert_failure;
use crate::support::auth::admin_bearer;
use crate::support::factory::seed_contact;
use crate::support::{build_test_state, create_test_app, shared_txn};

#[actix_web::test]
async fn test_submit_contact_normalises_and_returns_201() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .set_json(json!({
            "full_name": "  Nguyễn Văn An ",
            "email": "An.Nguyen@CongTy.VN",
            "phone": "0912.345.678",
            "company": "   ",
            "service": "Cloud VPS",
            "message": "Cần báo giá máy chủ ảo"
        }))
        .to_request();
    shared_txn::inject(&req, &shared);
    let resp = test::call_service(&app, req).await;

    let data = read_success_data(resp, StatusCode::CREATED).await;
    assert_eq!(data["full_name"], "Nguyễn Văn An");
    assert_eq!(data["email"], "an.nguyen@congty.vn");
    assert_eq!(data["phone"], "0912345678");
    assert!(data["company"].is_null(), "blank company is stored as null");
    assert_eq!(data["status"], "new");
    assert!(data["id"].as_i64().unwrap() > 0);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_submit_contact_reports_every_invalid_field() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .set_json(json!({
            "full_name": "",
            "email": "not-an-email",
            "phone": "12345",
            "message": "Xin chào"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let err = assert_failure(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST).await;
    assert!(err.has_field("full_name"));
    assert!(err.has_field("email"));
    assert!(err.has_field("phone"));
    assert!(!err.has_field("message"));
    Ok(())
}

#[actix_web::test]
async fn test_listing_contacts_requires_admin() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/contacts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_failure(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;

    let req = test::TestRequest::get()
        .uri("/api/contacts")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_failure(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn test_admin_manages_contacts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;

    let first = seed_contact(shared.transaction(), "Trần Thị Bình").await?;
    let second = seed_contact(shared.transaction(), "Lê Văn Cường").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    // Newest first, with paging meta.
    let req = test::TestRequest::get()
        .uri("/api/contacts?per_page=1")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["per_page"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], second.id);

    // Mark the first lead as contacted and clear its company.
    let req = test::TestRequest::patch()
        .uri(&format!("/api/contacts/{}", first.id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"status": "contacted", "company": null}))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["status"], "contacted");
    assert!(data["company"].is_null());
    assert_eq!(data["service"], "Email doanh nghiệp");

    let req = test::TestRequest::get()
        .uri("/api/contacts?status=contacted")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], first.id);

    // Delete, then the lead is gone.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/contacts/{}", first.id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Đã xóa liên hệ");

    let req = test::TestRequest::get()
        .uri(&format!("/api/contacts/{}", first.id))
        .insert_header(("Authorization", bearer))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "CONTACT_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_empty_contact_patch_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let contact = seed_contact(shared.transaction(), "Phạm Minh Đức").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/contacts/{}", contact.id))
        .insert_header(("Authorization", bearer))
        .set_json(json!({}))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_unknown_status_filter_is_a_query_error() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/api/contacts?status=archived")
        .insert_header(("Authorization", bearer))
        .to_request();
    assert_failure(
        test::call_service(&app, req).await,
        "INVALID_QUERY",
        StatusCode::BAD_REQUEST,
    )
    .await;
    Ok(())
}
