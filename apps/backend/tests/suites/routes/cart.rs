use actix_web::http::StatusCode;
use actix_web::test;
use backend::AppError;
use backend_test_support::envelope::read_success_data;
use serde_json::json;

use crate::common::assert_failure;
use crate::support::factory::{new_equipment, seed_equipment};
use crate::support::{build_test_state, create_test_app, shared_txn};

#[actix_web::test]
async fn test_quote_prices_cart_with_vat_and_reports_issues() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let ram = seed_equipment(txn, new_equipment("RAM-32G", "RAM 32GB", "Linh kiện", 2_500_000, 10)).await?;
    let disk = seed_equipment(txn, new_equipment("HDD-8T", "HDD 8TB", "Lưu trữ", 4_000_000, 1)).await?;
    let mut old = new_equipment("RAID-OLD", "RAID card cũ", "Linh kiện", 1_000_000, 5);
    old.active = false;
    let old = seed_equipment(txn, old).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/cart/quote")
        .set_json(json!([
            {"product_id": ram.id, "quantity": 2},
            {"product_id": disk.id, "quantity": 3},
            {"product_id": ram.id, "quantity": 1},
            {"product_id": old.id, "quantity": 1},
            {"product_id": 424242, "quantity": 1}
        ]))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;

    // 3 x 2.5M + 3 x 4M; the over-stock line is still priced.
    assert_eq!(data["lines"].as_array().unwrap().len(), 2);
    assert_eq!(data["lines"][0]["quantity"], 3);
    assert_eq!(data["total_items"], 6);
    assert_eq!(data["subtotal_vnd"], 19_500_000);
    assert_eq!(data["vat_vnd"], 1_950_000);
    assert_eq!(data["total_vnd"], 21_450_000);

    let kinds: Vec<&str> = data["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["insufficient_stock", "inactive", "unknown_product"]);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_empty_cart_quotes_zero() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/cart/quote")
        .set_json(json!([]))
        .to_request();
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["total_vnd"], 0);
    assert_eq!(data["lines"], json!([]));
    assert_eq!(data["issues"], json!([]));
    Ok(())
}

#[actix_web::test]
async fn test_invalid_cart_lines_are_rejected_by_index() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/cart/quote")
        .set_json(json!([
            {"product_id": 1, "quantity": 1},
            {"product_id": 2, "quantity": 0}
        ]))
        .to_request();
    let err = assert_failure(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(err.has_field("items[1].quantity"));

    let req = test::TestRequest::post()
        .uri("/api/cart/quote")
        .set_json(json!([{"product_id": 1, "quantity": -3}]))
        .to_request();
    assert_failure(
        test::call_service(&app, req).await,
        "INVALID_JSON",
        StatusCode::BAD_REQUEST,
    )
    .await;
    Ok(())
}
