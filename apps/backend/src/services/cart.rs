//! Prices a client-held cart against the catalogue.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::domain::cart::{quote, Cart, CartQuote, PricedProduct};
use crate::errors::domain::DomainError;
use crate::repos::equipment;

pub struct CartService;

impl CartService {
    pub fn new() -> Self {
        Self
    }

    pub async fn quote<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        cart: &Cart,
    ) -> Result<CartQuote, DomainError> {
        let products = equipment::find_by_ids(conn, &cart.product_ids()).await?;
        let catalogue: HashMap<i64, PricedProduct> =
            products.iter().map(|p| (p.id, p.priced())).collect();

        let result = quote(cart, &catalogue);
        debug!(
            lines = result.lines.len(),
            issues = result.issues.len(),
            total_vnd = result.total_vnd,
            "cart quoted"
        );
        Ok(result)
    }
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}
