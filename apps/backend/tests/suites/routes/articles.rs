use actix_web::http::StatusCode;
use actix_web::test;
use backend::AppError;
use backend_test_support::envelope::{read_success, read_success_data};
use serde_json::{json, Value};

use crate::common::assert_failure;
use crate::support::auth::admin_bearer;
use crate::support::factory::seed_article;
use crate::support::{build_test_state, create_test_app, shared_txn};

fn slugs(data: &Value) -> Vec<String> {
    data.as_array()
        .expect("data should be an array")
        .iter()
        .map(|a| a["slug"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_public_list_hides_drafts_even_when_asked() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    seed_article(shared.transaction(), "Ten mien la gi", "Tên miền", true).await?;
    seed_article(shared.transaction(), "Ban nhap bi mat", "Tên miền", false).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/api/articles?include_drafts=true")
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(slugs(&body["data"]), vec!["ten-mien-la-gi"]);
    assert!(
        body["data"][0].get("content").is_none(),
        "list items are summaries"
    );

    let req = test::TestRequest::get()
        .uri("/api/articles?include_drafts=true")
        .insert_header(("Authorization", bearer))
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 2);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_list_filters_by_category_tag_featured_and_search() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for body in [
        json!({"title": "Bao mat email", "content": "x", "category": "Email",
               "tags": ["bảo mật", "email"], "published": true, "featured": true}),
        json!({"title": "Chon goi VPS", "content": "x", "category": "Cloud",
               "tags": ["vps"], "published": true}),
        json!({"title": "Email theo ten mien", "content": "x", "category": "Email",
               "tags": ["email"], "published": true}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/articles")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(body)
            .to_request();
        shared_txn::inject(&req, &shared);
        read_success(test::call_service(&app, req).await, StatusCode::CREATED).await;
    }

    let cases = [
        ("/api/articles?category=Cloud", vec!["chon-goi-vps"]),
        ("/api/articles?featured=true", vec!["bao-mat-email"]),
        ("/api/articles?tag=b%E1%BA%A3o%20m%E1%BA%ADt", vec!["bao-mat-email"]),
        ("/api/articles?search=TEN%20MIEN", vec!["email-theo-ten-mien"]),
    ];
    for (uri, expected) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        shared_txn::inject(&req, &shared);
        let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
        assert_eq!(slugs(&body["data"]), expected, "filter {uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/articles?category=Email&tag=email")
        .to_request();
    shared_txn::inject(&req, &shared);
    let body = read_success(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 2);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_reading_by_slug_counts_views() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    seed_article(shared.transaction(), "Dang ky ten mien VN", "Tên miền", true).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    for expected in [1, 2] {
        let req = test::TestRequest::get()
            .uri("/api/articles/slug/dang-ky-ten-mien-vn")
            .to_request();
        shared_txn::inject(&req, &shared);
        let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
        assert_eq!(data["view_count"], expected);
        assert!(data["content"].as_str().is_some());
    }

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_drafts_are_not_found_for_visitors() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let draft = seed_article(shared.transaction(), "Sap ra mat", "Tin tức", false).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/api/articles/slug/sap-ra-mat")
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "ARTICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/articles/{}", draft.id))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "ARTICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/articles/{}", draft.id))
        .insert_header(("Authorization", bearer))
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["published"], false);
    assert!(data["published_at"].is_null());

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_duplicate_slug_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    seed_article(shared.transaction(), "Hosting gia re", "Hosting", true).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .insert_header(("Authorization", bearer))
        .set_json(json!({
            "title": "Hosting giá rẻ",
            "content": "Bản sao",
            "category": "Hosting"
        }))
        .to_request();
    shared_txn::inject(&req, &shared);
    assert_failure(
        test::call_service(&app, req).await,
        "SLUG_CONFLICT",
        StatusCode::CONFLICT,
    )
    .await;

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_publishing_stamps_published_at_and_patch_clears_nullable_fields(
) -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let shared = shared_txn::open(&state).await;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({
            "title": "Sao luu du lieu",
            "excerpt": "Tóm tắt",
            "content": "Nội dung",
            "category": "Bảo mật",
            "author": "Ban biên tập"
        }))
        .to_request();
    shared_txn::inject(&req, &shared);
    let created = read_success_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(created["slug"], "sao-luu-du-lieu");
    assert!(created["published_at"].is_null());
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/articles/{id}"))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"published": true, "excerpt": null}))
        .to_request();
    shared_txn::inject(&req, &shared);
    let updated = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(updated["published"], true);
    assert!(updated["published_at"].is_string());
    assert!(updated["excerpt"].is_null());
    assert_eq!(updated["author"], "Ban biên tập");
    let first_published_at = updated["published_at"].clone();

    // Unpublish and republish: the first publication time is kept.
    for published in [false, true] {
        let req = test::TestRequest::patch()
            .uri(&format!("/api/articles/{id}"))
            .insert_header(("Authorization", bearer.clone()))
            .set_json(json!({ "published": published }))
            .to_request();
        shared_txn::inject(&req, &shared);
        let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
        assert_eq!(data["published_at"], first_published_at);
    }

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_related_and_categories_only_count_published() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    seed_article(txn, "Goi email co ban", "Email", true).await?;
    seed_article(txn, "Goi email nang cao", "Email", true).await?;
    seed_article(txn, "Email cho ngan hang", "Email", true).await?;
    seed_article(txn, "Email nhap", "Email", false).await?;
    seed_article(txn, "VPS la gi", "Cloud", true).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/api/articles/slug/goi-email-co-ban/related")
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    let mut related = slugs(&data);
    related.sort();
    assert_eq!(related, vec!["email-cho-ngan-hang", "goi-email-nang-cao"]);

    let req = test::TestRequest::get()
        .uri("/api/articles/categories")
        .to_request();
    shared_txn::inject(&req, &shared);
    let data = read_success_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(
        data,
        json!([
            {"category": "Cloud", "count": 1},
            {"category": "Email", "count": 3}
        ])
    );

    shared_txn::rollback(shared).await;
    Ok(())
}

#[actix_web::test]
async fn test_article_writes_require_admin_and_ids_must_be_numeric() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .set_json(json!({"title": "x", "content": "y", "category": "z"}))
        .to_request();
    assert_failure(
        test::call_service(&app, req).await,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/articles/not-a-number")
        .to_request();
    assert_failure(
        test::call_service(&app, req).await,
        "INVALID_PATH",
        StatusCode::BAD_REQUEST,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_deleting_missing_article_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let bearer = admin_bearer(&state.security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::delete()
        .uri("/api/articles/9999")
        .insert_header(("Authorization", bearer))
        .to_request();
    let err = assert_failure(
        test::call_service(&app, req).await,
        "ARTICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(err.message, "Không tìm thấy bài viết #9999");
    Ok(())
}

#[actix_web::test]
async fn test_out_of_range_page_is_a_validation_error() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/api/articles?page={}", u64::MAX))
        .to_request();
    let err = assert_failure(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(err.has_field("page"));
    Ok(())
}
