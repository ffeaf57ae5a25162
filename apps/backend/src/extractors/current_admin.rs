use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::state::app_state::AppState;

/// Authenticated CMS administrator.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentAdmin {
    pub username: String,
    /// Token expiry (seconds since epoch)
    pub expires_at: i64,
}

fn admin_from_token(req: &HttpRequest, token: &AuthToken) -> Result<CurrentAdmin, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_access_token(&token.token, &state.security)?;

    // Tokens minted for a previous admin account stop working once it changes.
    match &state.security.admin {
        Some(admin) if admin.username == claims.sub => Ok(CurrentAdmin {
            username: claims.sub,
            expires_at: claims.exp,
        }),
        _ => Err(AppError::forbidden()),
    }
}

impl FromRequest for CurrentAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            AuthToken::from_headers(req)
                .and_then(|t| t.ok_or_else(AppError::unauthorized_missing_bearer))
                .and_then(|t| admin_from_token(req, &t)),
        )
    }
}

/// Admin identity when a bearer token is present; `None` for anonymous callers.
/// A token that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAdmin(pub Option<CurrentAdmin>);

impl MaybeAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for MaybeAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match AuthToken::from_headers(req) {
            Ok(Some(token)) => admin_from_token(req, &token).map(|a| MaybeAdmin(Some(a))),
            Ok(None) => Ok(MaybeAdmin(None)),
            Err(e) => Err(e),
        })
    }
}
