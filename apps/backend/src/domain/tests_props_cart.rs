//! Property tests for the cart (pure domain, no DB).

use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::cart::{quote, Cart, CartItem, PricedProduct, MAX_QUANTITY_PER_ITEM};
use crate::domain::test_prelude;

fn ops() -> impl Strategy<Value = Vec<(i64, u32)>> {
    prop::collection::vec((1i64..=8, 1u32..=150), 0..40)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every line stays within 1..=MAX_QUANTITY_PER_ITEM and product ids are unique.
    #[test]
    fn prop_lines_stay_bounded(adds in ops()) {
        let mut cart = Cart::new();
        for (id, qty) in &adds {
            cart.add(*id, *qty).unwrap();
        }
        let mut ids = cart.product_ids();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), cart.items().len());
        for item in cart.items() {
            prop_assert!(item.quantity >= 1 && item.quantity <= MAX_QUANTITY_PER_ITEM);
        }
    }

    /// Adding matches a saturating per-product sum.
    #[test]
    fn prop_add_is_saturating_sum(adds in ops()) {
        let mut cart = Cart::new();
        let mut expected: HashMap<i64, u32> = HashMap::new();
        for (id, qty) in &adds {
            cart.add(*id, *qty).unwrap();
            let e = expected.entry(*id).or_default();
            *e = (*e + qty).min(MAX_QUANTITY_PER_ITEM);
        }
        for (id, qty) in expected {
            prop_assert_eq!(cart.quantity(id), qty);
        }
    }

    /// The stored JSON array reloads into the same cart.
    #[test]
    fn prop_json_reload_preserves_cart(adds in ops()) {
        let mut cart = Cart::new();
        for (id, qty) in &adds {
            cart.add(*id, *qty).unwrap();
        }
        let json = serde_json::to_string(&cart).unwrap();
        let reloaded: Cart = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(reloaded, cart);
    }

    /// Quote totals are consistent with the priced lines.
    #[test]
    fn prop_quote_totals_consistent(
        adds in ops(),
        prices in prop::collection::vec(0i64..=500_000_000, 8),
    ) {
        let mut cart = Cart::new();
        for (id, qty) in &adds {
            cart.add(*id, *qty).unwrap();
        }
        let catalogue: HashMap<i64, PricedProduct> = prices
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx % 3 != 0)
            .map(|(idx, price)| {
                let id = idx as i64 + 1;
                (id, PricedProduct {
                    id,
                    sku: format!("P{id}"),
                    name: format!("P{id}"),
                    price_vnd: *price,
                    stock: 50,
                    active: idx % 4 != 1,
                })
            })
            .collect();

        let q = quote(&cart, &catalogue);
        let subtotal: i64 = q.lines.iter().map(|l| l.line_total_vnd).sum();
        prop_assert_eq!(q.subtotal_vnd, subtotal);
        prop_assert_eq!(q.total_vnd, q.subtotal_vnd + q.vat_vnd);
        prop_assert_eq!(q.lines.len() + q.issues.iter()
            .filter(|i| i.kind != crate::domain::cart::QuoteIssueKind::InsufficientStock)
            .count(), cart.items().len());
        let items: Vec<CartItem> = cart.items().to_vec();
        prop_assert!(q.total_items <= items.iter().map(|i| i.quantity).sum::<u32>());
    }
}
