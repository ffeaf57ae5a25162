use actix_http::Request;
use actix_web::HttpMessage;
use backend::db::require_db;
use backend::db::txn::SharedTxn;
use backend::state::app_state::AppState;

/// Begin a transaction on the state's pool and wrap it as a SharedTxn.
///
/// Tests own the transaction lifecycle - handlers never commit it.
pub async fn open(state: &AppState) -> SharedTxn {
    let db = require_db(state).expect("DB required for this test");
    SharedTxn::open(db)
        .await
        .expect("Failed to begin transaction")
}

/// Make `with_txn()` in handlers run on `shared`.
pub fn inject(req: &Request, shared: &SharedTxn) {
    req.extensions_mut().insert(shared.clone());
}

/// Roll back once the handlers' clones are gone.
///
/// Responses must have been read to completion first.
pub async fn rollback(shared: SharedTxn) {
    for _ in 0..16 {
        if shared.strong_count() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    if shared.strong_count() == 1 {
        shared.rollback().await.expect("rollback should succeed");
    }
    // Still shared: the last clone's drop rolls the transaction back.
}
