use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::credentials::verify_admin;
use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::http::{envelope, timestamp};
use crate::logging::pii::Redacted;
use crate::middleware::rate_limit::{auth_rate_limit_config, limiter, RateLimits};
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
    pub expires_at: String,
}

fn expiry(exp: i64) -> String {
    OffsetDateTime::from_unix_timestamp(exp)
        .map(timestamp)
        .unwrap_or_else(|_| exp.to_string())
}

/// Exchange the CMS admin username/password for a bearer token.
async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    let Some(admin) = app_state.security.admin.as_ref() else {
        warn!("login attempted but no CMS admin is configured");
        return Err(AppError::invalid_credentials());
    };
    if !verify_admin(admin, &username, &password) {
        warn!(username = %Redacted(&username), "admin login rejected");
        return Err(AppError::invalid_credentials());
    }

    let (token, claims) = mint_access_token(&admin.username, SystemTime::now(), &app_state.security)?;
    info!(username = %admin.username, "admin logged in");

    Ok(envelope::ok(LoginResponse {
        token,
        expires_at: expiry(claims.exp),
    }))
}

async fn me(admin: CurrentAdmin) -> Result<HttpResponse, AppError> {
    Ok(envelope::ok(MeResponse {
        expires_at: expiry(admin.expires_at),
        username: admin.username,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        resource("/login")
            .wrap(limiter(limits, auth_rate_limit_config()))
            .route(web::post().to(login)),
    )
    .service(resource("/me").route(web::get().to(me)));
}
