//! Shopping cart for server equipment.
//!
//! The cart lives on the client; the server only validates it and prices it.
//! Lines keep the order in which products were first added, and the cart
//! serialises to the `[{"product_id", "quantity"}]` array the client stores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldError, FieldErrors};
use crate::errors::domain::DomainError;

pub const MAX_QUANTITY_PER_ITEM: u32 = 99;
pub const VAT_PERCENT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CartItem>", try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

fn invalid(field: &str, message: &str) -> DomainError {
    DomainError::invalid_fields(vec![FieldError::new(field, message)])
}

fn check_product_id(product_id: i64) -> Result<(), DomainError> {
    if product_id <= 0 {
        return Err(invalid("product_id", "Mã sản phẩm không hợp lệ"));
    }
    Ok(())
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from client lines, merging duplicates.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Result<Self, DomainError> {
        let mut cart = Self::new();
        let mut errs = FieldErrors::new();
        for (idx, item) in items.into_iter().enumerate() {
            if let Err(DomainError::Validation { fields, .. }) = cart.add(item.product_id, item.quantity)
            {
                for f in fields {
                    errs.push(&format!("items[{idx}].{}", f.field), f.message);
                }
            }
        }
        errs.into_result()?;
        Ok(cart)
    }

    /// Add `quantity` (>= 1) units. The line total saturates at
    /// [`MAX_QUANTITY_PER_ITEM`].
    pub fn add(&mut self, product_id: i64, quantity: u32) -> Result<(), DomainError> {
        check_product_id(product_id)?;
        if quantity == 0 {
            return Err(invalid("quantity", "Số lượng phải lớn hơn 0"));
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .saturating_add(quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
            }
            None => self.items.push(CartItem {
                product_id,
                quantity: quantity.min(MAX_QUANTITY_PER_ITEM),
            }),
        }
        Ok(())
    }

    /// Replace a line's quantity; 0 removes the line.
    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> Result<(), DomainError> {
        check_product_id(product_id)?;
        if quantity == 0 {
            self.remove(product_id);
            return Ok(());
        }
        let quantity = quantity.min(MAX_QUANTITY_PER_ITEM);
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn quantity(&self, product_id: i64) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn product_ids(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.product_id).collect()
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = DomainError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

/// Catalogue data needed to price a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedProduct {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price_vnd: i64,
    pub stock: i32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_vnd: i64,
    pub line_total_vnd: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteIssueKind {
    UnknownProduct,
    Inactive,
    InsufficientStock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteIssue {
    pub product_id: i64,
    pub kind: QuoteIssueKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartQuote {
    pub lines: Vec<QuoteLine>,
    pub issues: Vec<QuoteIssue>,
    pub total_items: u32,
    pub subtotal_vnd: i64,
    pub vat_vnd: i64,
    pub total_vnd: i64,
}

/// VAT rounded half-up to the nearest dong.
pub fn vat_for(subtotal_vnd: i64) -> i64 {
    subtotal_vnd.saturating_mul(VAT_PERCENT).saturating_add(50) / 100
}

/// Price `cart` against `catalogue`.
///
/// Unknown and inactive products are reported and left out of the totals.
/// Lines above the available stock are still priced but reported.
pub fn quote(cart: &Cart, catalogue: &HashMap<i64, PricedProduct>) -> CartQuote {
    let mut lines = Vec::new();
    let mut issues = Vec::new();

    for item in cart.items() {
        let Some(product) = catalogue.get(&item.product_id) else {
            issues.push(QuoteIssue {
                product_id: item.product_id,
                kind: QuoteIssueKind::UnknownProduct,
                message: "Sản phẩm không tồn tại".to_string(),
            });
            continue;
        };
        if !product.active {
            issues.push(QuoteIssue {
                product_id: item.product_id,
                kind: QuoteIssueKind::Inactive,
                message: format!("Sản phẩm {} đã ngừng kinh doanh", product.name),
            });
            continue;
        }
        if i64::from(item.quantity) > i64::from(product.stock) {
            issues.push(QuoteIssue {
                product_id: item.product_id,
                kind: QuoteIssueKind::InsufficientStock,
                message: format!(
                    "Sản phẩm {} chỉ còn {} trong kho",
                    product.name,
                    product.stock.max(0)
                ),
            });
        }
        lines.push(QuoteLine {
            product_id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity: item.quantity,
            unit_price_vnd: product.price_vnd,
            line_total_vnd: product.price_vnd.saturating_mul(i64::from(item.quantity)),
        });
    }

    let total_items = lines.iter().map(|l| l.quantity).sum();
    let subtotal_vnd = lines
        .iter()
        .fold(0i64, |acc, l| acc.saturating_add(l.line_total_vnd));
    let vat_vnd = vat_for(subtotal_vnd);

    CartQuote {
        lines,
        issues,
        total_items,
        subtotal_vnd,
        vat_vnd,
        total_vnd: subtotal_vnd.saturating_add(vat_vnd),
    }
}
