//! `ValidatedJson<T>`: a JSON body extractor that fails with the site's error
//! envelope instead of actix's plain-text 400.

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Body cap when no [`JsonBodyLimit`] is registered. CMS batches are the
/// largest payloads.
pub const MAX_JSON_BODY_BYTES: usize = 256 * 1024;

/// Per-app override of [`MAX_JSON_BODY_BYTES`], registered with `App::app_data`.
#[derive(Debug, Clone, Copy)]
pub struct JsonBodyLimit(pub usize);

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

fn too_large() -> AppError {
    AppError::bad_request(ErrorCode::BadRequest, "Nội dung yêu cầu quá lớn")
}

/// Declared `Content-Length`, when present and numeric.
fn declared_length(req: &HttpRequest) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

async fn read_body(mut payload: Payload, limit: usize) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "request body stream failed");
            AppError::bad_request(ErrorCode::BadRequest, "Không đọc được nội dung yêu cầu")
        })?;
        if body.len() + chunk.len() > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(error = %Redacted(&e.to_string()), body_size = body.len(), "JSON body rejected");
        AppError::bad_request(ErrorCode::InvalidJson, describe_json_error(&e))
    })
}

/// User-facing reason for a parse failure. Never echoes the payload.
fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("JSON không hợp lệ tại dòng {}", error.line()),
        Category::Eof => "JSON không hợp lệ: dữ liệu bị cắt ngang".to_string(),
        Category::Data => "JSON không hợp lệ: sai kiểu dữ liệu ở một hoặc nhiều trường".to_string(),
        Category::Io => "JSON không hợp lệ: lỗi khi đọc dữ liệu".to_string(),
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let limit = req
            .app_data::<JsonBodyLimit>()
            .map_or(MAX_JSON_BODY_BYTES, |l| l.0);

        // Oversized bodies that say so up front are refused unread.
        if declared_length(req).is_some_and(|len| len > limit) {
            return Box::pin(async { Err(too_large()) });
        }

        let payload = payload.take();
        Box::pin(async move {
            let body = read_body(payload, limit).await?;
            parse_body(&body).map(ValidatedJson)
        })
    }
}
