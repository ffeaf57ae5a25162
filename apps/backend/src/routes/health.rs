//! `GET /health`: always 200 while the process is up; database trouble is
//! reported in the body.

use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::http::timestamp;
use crate::state::app_state::AppState;

const UNKNOWN_MIGRATION: &str = "unknown";

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

/// Outcome of the database probe.
enum DbProbe {
    Up { migration: String },
    Down { reason: String },
}

async fn probe(db: &DatabaseConnection) -> DbProbe {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    if let Err(e) = db.query_one(ping).await {
        return DbProbe::Down {
            reason: format!("Truy vấn CSDL thất bại: {e}"),
        };
    }

    let migration = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "none".to_string(),
        Err(e) => {
            warn!(error = %e, "could not read migration version");
            UNKNOWN_MIGRATION.to_string()
        }
    };
    DbProbe::Up { migration }
}

async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let probe = match require_db(&state) {
        Ok(db) => probe(db).await,
        Err(e) => DbProbe::Down {
            reason: e.to_string(),
        },
    };

    let (db, db_error, migrations) = match probe {
        DbProbe::Up { migration } => ("ok", None, migration),
        DbProbe::Down { reason } => {
            warn!(reason = %reason, "health probe: database down");
            ("error", Some(reason), UNKNOWN_MIGRATION.to_string())
        }
    };

    Ok(HttpResponse::Ok().json(HealthReport {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations,
        time: timestamp(OffsetDateTime::now_utc()),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
