use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{
    make_conn_spec, pool_settings, validate_db_config, DbKind, DbOwner, RuntimeEnv,
};
use crate::error::DbInfraError;
use crate::infra::db::locking::PgAdvisoryLock;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| DbInfraError::connect("no error recorded after max attempts")))
}

async fn connect(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, owner)?;
    let settings = pool_settings(db_kind, owner);

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(settings.min)
        .max_connections(settings.max)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .sqlx_logging(false);

    if db_kind == DbKind::SqliteMemory {
        // Closing the only connection would drop the database.
        opt.idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }

    let pool = if db_kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        DbInfraError::connect(format!("failed to connect to Postgres: {e}"))
                    })
                }
            },
            5,
            500,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::connect(format!("failed to connect to SQLite: {e}")))?
    };

    info!(
        "pool=create engine={} owner={:?} min={} max={} acquire_timeout_ms={}",
        get_db_engine(db_kind),
        owner,
        settings.min,
        settings.max,
        settings.acquire_timeout_ms
    );

    Ok(pool)
}

/// Build admin pool for migrations - single connection only.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    connect(env, db_kind, DbOwner::Owner).await
}

/// Build the application pool. Does not run migrations.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    connect(env, db_kind, DbOwner::App).await
}

/// Sanitize database URL by masking the password.
/// Used for lock keys and logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if colon_pos > auth_part.find("://").map_or(0, |p| p + 2) => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;
    let admin_pool = build_admin_pool(env, db_kind).await?;
    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(
        "migrate=start env={:?} db_kind={:?} engine={} command={:?}",
        env,
        db_kind,
        get_db_engine(db_kind),
        command
    );

    let run = |pool: &DatabaseConnection| {
        let pool = pool.clone();
        async move {
            migrate(&pool, command)
                .await
                .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))
        }
    };

    let result = match db_kind {
        DbKind::Postgres if !matches!(command, MigrationCommand::Status) => {
            let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
            let key = format!("site:migrate:{}", sanitize_db_url(&url));
            let lock = PgAdvisoryLock::new(pool.clone(), &key);

            lock.acquire().await?;
            let result = run(pool).await;
            lock.release().await;
            result
        }
        DbKind::SqliteFile if !matches!(command, MigrationCommand::Status) => {
            // WAL needs exclusive access, so set it before the app pool exists.
            pool.execute_unprepared("PRAGMA journal_mode=WAL;")
                .await
                .map_err(|e| DbInfraError::config(format!("failed to enable WAL: {e}")))?;
            run(pool).await
        }
        _ => run(pool).await,
    };

    info!("migrate=done ok={}", result.is_ok());
    result
}

/// Build the app DB *and* guarantee the schema is current.
///
/// - SqliteMemory: migrate on the returned pool, since each connection is its
///   own database.
/// - Others: migrate on a single-connection owner pool, then build the app pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    validate_db_config(env, db_kind)?;

    info!(
        "bootstrap=start env={:?} db_kind={:?} engine={} pid={}",
        env,
        db_kind,
        get_db_engine(db_kind),
        std::process::id()
    );

    let pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind).await?;
            orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up).await?;
            pool
        }
        _ => {
            let admin_pool = build_admin_pool(env, db_kind).await?;
            orchestrate_migration_internal(&admin_pool, env, db_kind, MigrationCommand::Up)
                .await?;
            if let Err(e) = admin_pool.close().await {
                warn!(error = %e, "failed to close admin pool");
            }
            build_pool(env, db_kind).await?
        }
    };

    info!("bootstrap=ready");
    Ok(pool)
}
