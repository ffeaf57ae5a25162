use std::env;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Runtime environment the database is being opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Storage engine backing the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL (production default)
    Postgres,
    /// SQLite database stored on disk
    SqliteFile,
    /// SQLite in-memory database; each connection is its own database
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(Self::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unknown database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub min: u32,
    pub max: u32,
    pub acquire_timeout_ms: u64,
}

/// Pool sizing for the given engine and owner.
///
/// In-memory SQLite and owner pools always use a single connection: the
/// in-memory database lives inside that connection, and the Postgres advisory
/// lock is session-scoped.
pub fn pool_settings(db_kind: DbKind, owner: DbOwner) -> PoolSettings {
    match (db_kind, owner) {
        (DbKind::SqliteMemory, _) | (_, DbOwner::Owner) => PoolSettings {
            min: 1,
            max: 1,
            acquire_timeout_ms: 2_000,
        },
        (DbKind::SqliteFile, DbOwner::App) => PoolSettings {
            min: 1,
            max: 4,
            acquire_timeout_ms: 5_000,
        },
        (DbKind::Postgres, DbOwner::App) => {
            let max = env::var("DB_POOL_MAX")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10);
            PoolSettings {
                min: 2.min(max),
                max,
                acquire_timeout_ms: 5_000,
            }
        }
    }
}

/// Reject combinations that make no sense for the environment.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if env == RuntimeEnv::Prod && db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "in-memory SQLite cannot be used in production (data would be lost on restart)",
        ));
    }
    Ok(())
}

/// Builds a connection string from environment variables.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = pg_db_name(env)?;
            let (username, password) = credentials(owner)?;
            let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
            let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = sqlite_path(env)?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn pg_db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn sqlite_path(env: RuntimeEnv) -> Result<String, DbInfraError> {
    let path = match env::var("SQLITE_PATH") {
        Ok(path) if !path.trim().is_empty() => path,
        _ => match env {
            RuntimeEnv::Prod => "./data/site.db".to_string(),
            RuntimeEnv::Test => "./data/site_test.db".to_string(),
        },
    };

    if env == RuntimeEnv::Test && !path.ends_with("_test.db") {
        return Err(DbInfraError::config(format!(
            "Test profile requires SQLite file to end with '_test.db', but got: '{path}'"
        )));
    }
    Ok(path)
}

fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("SITE_OWNER_USER")?,
            must_var("SITE_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}
