use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::domain::cart::{Cart, CartItem};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::http::envelope;
use crate::services::cart::CartService;
use crate::state::app_state::AppState;
use super::resource;

/// Price the client's cart. The body is the stored cart array; duplicate
/// lines are merged before pricing.
async fn quote_cart(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<Vec<CartItem>>,
) -> Result<HttpResponse, AppError> {
    let cart = Cart::from_items(body.into_inner())?;
    let quote = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            CartService::new()
                .quote(txn, &cart)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(quote))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/quote").route(web::post().to(quote_cart)));
}
