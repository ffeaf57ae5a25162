use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;

/// Bearer token taken from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    /// `Ok(None)` when the request carries no `Authorization` header.
    pub fn from_headers(req: &HttpRequest) -> Result<Option<Self>, AppError> {
        let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
            return Ok(None);
        };

        let auth_value = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized_missing_bearer())?;

        // "Bearer <token>"
        let mut parts = auth_value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(Some(AuthToken {
                    token: token.to_string(),
                }))
            }
            _ => Err(AppError::unauthorized_missing_bearer()),
        }
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            Self::from_headers(req)
                .and_then(|t| t.ok_or_else(AppError::unauthorized_missing_bearer)),
        )
    }
}
