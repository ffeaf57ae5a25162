use backend::domain::article::{ArticleFilter, ArticlePatch};
use backend::domain::paging::PageRequest;
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::services::articles::ArticleService;
use backend::AppError;
use backend_test_support::unique_helpers::unique_slug;

use crate::support::factory::{new_article, seed_article};
use crate::support::shared_txn;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn test_published_at_is_stamped_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ArticleService::new();

    let draft = seed_article(txn, "Sao lưu dữ liệu định kỳ", "Cloud", false).await?;
    assert_eq!(draft.slug, "sao-luu-du-lieu-dinh-ky");
    assert!(draft.published_at.is_none());
    assert_eq!(draft.created_at, draft.updated_at);

    let published = service
        .update(
            txn,
            draft.id,
            ArticlePatch {
                published: Some(true),
                ..Default::default()
            },
        )
        .await?;
    let stamped = published.published_at.expect("publishing stamps published_at");
    assert_eq!(stamped, published.updated_at);

    let hidden = service
        .update(
            txn,
            draft.id,
            ArticlePatch {
                published: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(!hidden.published);
    assert_eq!(hidden.published_at, Some(stamped));

    let again = service
        .update(
            txn,
            draft.id,
            ArticlePatch {
                published: Some(true),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(again.published_at, Some(stamped));

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_publishing_on_create_shares_one_timestamp() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();

    let article = seed_article(txn, "Chọn gói hosting phù hợp", "Hosting", true).await?;
    assert_eq!(article.published_at, Some(article.created_at));
    assert_eq!(article.updated_at, article.created_at);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_related_is_capped_and_stays_in_category() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ArticleService::new();

    let anchor = seed_article(txn, "Email doanh nghiệp là gì", "Email", true).await?;
    for title in ["Cấu hình SPF", "Cấu hình DKIM", "Cấu hình DMARC", "Chống spam"] {
        seed_article(txn, title, "Email", true).await?;
    }
    seed_article(txn, "Bản nháp email", "Email", false).await?;
    seed_article(txn, "Máy chủ ảo", "Cloud", true).await?;

    let related = service.related(txn, &anchor.slug).await?;
    assert_eq!(related.len(), 3);
    for article in &related {
        assert_ne!(article.id, anchor.id);
        assert_eq!(article.category, "Email");
        assert!(article.published);
    }

    let err = service.related(txn, "ban-nhap-email").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Article, _)));

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_search_ignores_case_and_hides_drafts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ArticleService::new();

    let mut with_excerpt = new_article("Giải pháp lưu trữ", "Cloud", true);
    with_excerpt.excerpt = Some("Backup tự động hằng ngày".to_string());
    service.create(txn, with_excerpt).await?;
    seed_article(txn, "BACKUP cho máy chủ", "Cloud", true).await?;
    seed_article(txn, "Backup nội bộ", "Cloud", false).await?;

    let filter = ArticleFilter {
        search: Some("backup".to_string()),
        ..Default::default()
    };
    let (found, total) = service.list(txn, &filter, PageRequest::default()).await?;
    assert_eq!(total, 2);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|a| a.published));

    let with_drafts = ArticleFilter {
        include_drafts: true,
        ..filter
    };
    let (_, total) = service
        .list(txn, &with_drafts, PageRequest::default())
        .await?;
    assert_eq!(total, 3);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_read_by_slug_counts_views() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ArticleService::new();

    let article = seed_article(txn, "Tên miền .VN", "Domain", true).await?;
    assert_eq!(article.view_count, 0);

    assert_eq!(service.read_by_slug(txn, &article.slug).await?.view_count, 1);
    assert_eq!(service.read_by_slug(txn, &article.slug).await?.view_count, 2);
    assert_eq!(service.get(txn, article.id, false).await?.view_count, 2);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_explicit_slug_is_kept() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();

    let slug = unique_slug("bai-viet");
    let mut article = new_article("Tiêu đề bất kỳ", "Email", true);
    article.slug = Some(slug.clone());
    let created = ArticleService::new().create(txn, article).await?;
    assert_eq!(created.slug, slug);

    shared_txn::rollback(shared).await;
    Ok(())
}
