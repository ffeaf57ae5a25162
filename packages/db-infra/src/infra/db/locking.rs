use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::DbInfraError;

pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Session-scoped PostgreSQL advisory lock serialising migrations across
/// processes that start at the same time.
///
/// INVARIANT: the pool must be configured with min=max=1 so lock and unlock
/// run on the same physical session.
pub struct PgAdvisoryLock {
    admin_pool: DatabaseConnection,
    lock_key: i64,
}

impl PgAdvisoryLock {
    pub fn new(admin_pool: DatabaseConnection, key: &str) -> Self {
        Self {
            admin_pool,
            lock_key: pg_lock_id(key),
        }
    }

    /// Block until the lock is held by this session.
    pub async fn acquire(&self) -> Result<(), DbInfraError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_lock($1)",
            vec![self.lock_key.into()],
        );
        self.admin_pool
            .execute(stmt)
            .await
            .map_err(|e| DbInfraError::migration(format!("failed to acquire advisory lock: {e}")))?;
        debug!(lock_key = self.lock_key, "advisory lock acquired");
        Ok(())
    }

    /// Release the lock. Failures are logged, never propagated: the lock is
    /// dropped with the session anyway.
    pub async fn release(&self) {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_unlock($1) AS unlocked",
            vec![self.lock_key.into()],
        );

        match self.admin_pool.query_one(stmt).await {
            Ok(Some(row)) => {
                let unlocked: bool = row.try_get("", "unlocked").unwrap_or(false);
                if !unlocked {
                    warn!(lock_key = self.lock_key, "advisory unlock returned false");
                }
            }
            Ok(None) => warn!(lock_key = self.lock_key, "advisory unlock returned no row"),
            Err(e) => warn!(error = %e, lock_key = self.lock_key, "advisory unlock failed"),
        }
    }
}
