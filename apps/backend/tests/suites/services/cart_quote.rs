use backend::domain::cart::{Cart, CartItem, QuoteIssueKind};
use backend::services::cart::CartService;
use backend::AppError;

use crate::support::factory::{new_equipment, seed_equipment};
use crate::support::shared_txn;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn test_quote_prices_from_catalogue() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();

    let router = seed_equipment(
        txn,
        new_equipment("RT-AX58", "Router Wi-Fi 6", "Mạng", 2_500_000, 5),
    )
    .await?;
    let ssd = seed_equipment(
        txn,
        new_equipment("SSD-512", "SSD NVMe 512GB", "Lưu trữ", 1_234_567, 1),
    )
    .await?;
    let mut retired = new_equipment("SW-OLD", "Switch 8 cổng", "Mạng", 900_000, 10);
    retired.active = false;
    let retired = seed_equipment(txn, retired).await?;

    let cart = Cart::from_items([
        CartItem { product_id: router.id, quantity: 1 },
        CartItem { product_id: ssd.id, quantity: 3 },
        CartItem { product_id: retired.id, quantity: 1 },
        CartItem { product_id: 99_999, quantity: 2 },
        CartItem { product_id: router.id, quantity: 1 },
    ])?;

    let quote = CartService::new().quote(txn, &cart).await?;

    let priced: Vec<(i64, u32, i64)> = quote
        .lines
        .iter()
        .map(|l| (l.product_id, l.quantity, l.line_total_vnd))
        .collect();
    assert_eq!(priced, vec![(router.id, 2, 5_000_000), (ssd.id, 3, 3_703_701)]);
    assert_eq!(quote.total_items, 5);
    assert_eq!(quote.subtotal_vnd, 8_703_701);
    // 870_370.1 rounds down.
    assert_eq!(quote.vat_vnd, 870_370);
    assert_eq!(quote.total_vnd, 9_574_071);

    let issues: Vec<(i64, QuoteIssueKind)> =
        quote.issues.iter().map(|i| (i.product_id, i.kind)).collect();
    assert_eq!(
        issues,
        vec![
            (ssd.id, QuoteIssueKind::InsufficientStock),
            (retired.id, QuoteIssueKind::Inactive),
            (99_999, QuoteIssueKind::UnknownProduct),
        ]
    );
    assert_eq!(quote.issues[0].message, "Sản phẩm SSD NVMe 512GB chỉ còn 1 trong kho");

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_empty_cart_quotes_zero() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;

    let quote = CartService::new()
        .quote(shared.transaction(), &Cart::new())
        .await?;
    assert!(quote.lines.is_empty() && quote.issues.is_empty());
    assert_eq!((quote.subtotal_vnd, quote.vat_vnd, quote.total_vnd), (0, 0, 0));

    shared_txn::rollback(shared).await;
    Ok(())
}
