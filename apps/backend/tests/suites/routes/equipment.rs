use actix_web::http::StatusCode;
use actix_web::test;
use backend::AppError;
use backend_test_support::envelope::{read_success, read_success_data};
use serde_json::json;

use crate::common::assert_failure;
use crate::support::auth::admin_bearer;
use crate::support::factory::{new_equipment, seed_equipment};
use crate::support::{build_test_state, create_test_app, shared_txn};

#[actix_web::test]
async fn test_admin_creates_equipment_with_upper_cased_sku() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/equipment")
        .insert_header(("Authorization", bearer))
        .set_json(json!({
            "sku": " hpe-dl380-g10 ",
            "name": "HPE ProLiant DL380 Gen10",
            "category": "Máy chủ",
            "brand": "HPE",
            "price_vnd": 125_000_000,
            "stock": 0
        }))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(data["sku"], "HPE-DL380-G10");
    assert_eq!(data["active"], true);
    assert_eq!(data["in_stock"], false);
    assert!(data["description"].is_null());

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_duplicate_sku_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    seed_equipment(
        shared.transaction(),
        new_equipment("SW-24P", "Switch 24 cổng", "Mạng", 8_500_000, 5),
    )
    .await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/equipment")
        .insert_header(("Authorization", bearer))
        .set_json(json!({
            "sku": "sw-24p",
            "name": "Switch khác",
            "category": "Mạng",
            "price_vnd": 1
        }))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "SKU_CONFLICT",
        StatusCode::CONFLICT,
    )
    .await;

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_catalogue_hides_inactive_items_from_visitors() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    seed_equipment(txn, new_equipment("R750", "Dell R750", "Máy chủ", 185_000_000, 2)).await?;
    seed_equipment(txn, new_equipment("SSD-1T", "SSD 1TB", "Lưu trữ", 3_200_000, 40)).await?;
    let mut retired = new_equipment("R640", "Dell R640", "Máy chủ", 90_000_000, 0);
    retired.active = false;
    let retired = seed_equipment(txn, retired).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    // Ordered by category, then name.
    let req = test::TestRequest::get()
        .uri("/api/equipment?include_inactive=true")
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"][0]["sku"], "SSD-1T");
    assert_eq!(body["data"][1]["sku"], "R750");

    let req = test::TestRequest::get()
        .uri("/api/equipment?category=M%C3%A1y%20ch%E1%BB%A7&include_inactive=true")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/equipment/{}", retired.id))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "EQUIPMENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/equipment/{}", retired.id))
        .insert_header(("Authorization", bearer))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["active"], false);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_patch_and_delete_equipment() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let mut item = new_equipment("UPS-3K", "UPS 3kVA", "Nguồn", 15_000_000, 1);
    item.brand = Some("APC".to_string());
    let item = seed_equipment(shared.transaction(), item).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/equipment/{}", item.id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"brand": null, "stock": 12, "price_vnd": 14_500_000}))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert!(data["brand"].is_null());
    assert_eq!(data["stock"], 12);
    assert_eq!(data["price_vnd"], 14_500_000);
    assert_eq!(data["name"], "UPS 3kVA");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/equipment/{}", item.id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"price_vnd": -1}))
        .to_request();
    shared_txn::inject(&req, &shared);
    let err = assert_failure(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(err.has_field("price_vnd"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/equipment/{}", item.id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Đã xóa sản phẩm");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/equipment/{}", item.id))
        .insert_header(("Authorization", bearer))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "EQUIPMENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    shared_txn::rollback(shared).await;
    Ok(())
}
