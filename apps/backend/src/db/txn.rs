use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Future returned by a [`with_txn`] closure; borrows the transaction.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// A shared transaction wrapper that can be injected into request extensions
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a transaction the caller owns; nothing here commits it.
    pub async fn open(conn: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self(Arc::new(conn.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Roll back. Fails while another clone is still alive.
    pub async fn rollback(self) -> Result<(), AppError> {
        let txn = Arc::try_unwrap(self.0)
            .map_err(|_| AppError::internal("cannot roll back: transaction is still shared"))?;
        txn.rollback().await?;
        Ok(())
    }
}

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is in request extensions → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure, apply policy on Ok / rollback on Err
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    // Clone out of extensions before awaiting so no RefCell borrow is held.
    let shared_txn: Option<SharedTxn> = req.and_then(|r| r.extensions().get::<SharedTxn>().cloned());

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(e) = txn.rollback().await {
                tracing::warn!(error = %e, "rollback after failed transaction also failed");
            }
            Err(err)
        }
    }
}
