use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::validation::FieldError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

const SERVER_ERROR_MESSAGE: &str = "Đã xảy ra lỗi máy chủ, vui lòng thử lại sau";
const UNAVAILABLE_MESSAGE: &str = "Hệ thống đang bận, vui lòng thử lại sau";
const RATE_LIMITED_MESSAGE: &str = "Bạn đã gửi quá nhiều yêu cầu, vui lòng thử lại sau ít phút";

/// Failure envelope rendered for every `AppError`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub success: bool,
    pub message: &'a str,
    pub code: &'static str,
    pub trace_id: String,
    #[serde(skip_serializing_if = "no_field_errors")]
    pub errors: &'a [FieldError],
}

fn no_field_errors(errors: &&[FieldError]) -> bool {
    errors.is_empty()
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        errors: Vec<FieldError>,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Method not allowed: {detail}")]
    MethodNotAllowed { detail: String },
    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::DbUnavailable { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            AppError::RateLimited { .. } => ErrorCode::RateLimited,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// User-facing message. Server-side failures never expose their detail.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::MethodNotAllowed { detail } => detail,
            AppError::RateLimited { .. } => RATE_LIMITED_MESSAGE,
            AppError::DbUnavailable { .. } => UNAVAILABLE_MESSAGE,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                SERVER_ERROR_MESSAGE
            }
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationError,
            detail: crate::errors::domain::INVALID_INPUT_MESSAGE.to_string(),
            errors,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            code: ErrorCode::Unauthorized,
            detail: "Vui lòng đăng nhập để tiếp tục".to_string(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedMissingBearer,
            detail: "Thiếu mã xác thực".to_string(),
        }
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidJwt,
            detail: "Mã xác thực không hợp lệ".to_string(),
        }
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedExpiredJwt,
            detail: "Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại".to_string(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            code: ErrorCode::InvalidCredentials,
            detail: "Tên đăng nhập hoặc mật khẩu không đúng".to_string(),
        }
    }

    pub fn forbidden() -> Self {
        Self::Forbidden {
            code: ErrorCode::Forbidden,
            detail: "Bạn không có quyền thực hiện thao tác này".to_string(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn method_not_allowed(method: &str, path: &str) -> Self {
        Self::MethodNotAllowed {
            detail: format!("Phương thức {method} không được hỗ trợ cho {path}"),
        }
    }

    /// Request budget exhausted; `retry_after` seconds until it refills.
    pub fn rate_limited(retry_after: u64) -> Self {
        Self::RateLimited { retry_after }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable {
            code: ErrorCode::DbUnavailable,
            detail: "database not configured".to_string(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message, fields } => AppError::Validation {
                code: ErrorCode::ValidationError,
                detail: message,
                errors: fields,
            },
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::ArticleSlug => ErrorCode::SlugConflict,
                    ConflictKind::EquipmentSku => ErrorCode::SkuConflict,
                    ConflictKind::Other(ref k) if k == "Unique" => ErrorCode::UniqueViolation,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Contact => ErrorCode::ContactNotFound,
                    NotFoundKind::DomainContact => ErrorCode::DomainContactNotFound,
                    NotFoundKind::Article => ErrorCode::ArticleNotFound,
                    NotFoundKind::Equipment => ErrorCode::EquipmentNotFound,
                    NotFoundKind::PageContent => ErrorCode::PageContentNotFound,
                    NotFoundKind::Other(ref k) if k == "Record" => ErrorCode::RecordNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable {
                    code: ErrorCode::DbUnavailable,
                    detail,
                },
                InfraErrorKind::Timeout => AppError::DbUnavailable {
                    code: ErrorCode::DbTimeout,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::db(detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<db_infra::DbInfraError> for AppError {
    fn from(e: db_infra::DbInfraError) -> Self {
        match e {
            db_infra::DbInfraError::Config { message } => AppError::config(message),
            db_infra::DbInfraError::Connect { message } => AppError::DbUnavailable {
                code: ErrorCode::DbUnavailable,
                detail: message,
            },
            db_infra::DbInfraError::Migration { message } => AppError::db(message),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = %self.code(), error = %self, "request failed");
        }

        let envelope = ErrorEnvelope {
            success: false,
            message: self.message(),
            code: self.code().as_str(),
            trace_id: trace_id.clone(),
            errors: self.field_errors(),
        };

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));

        match self {
            AppError::Unauthorized { .. } => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::DbUnavailable { .. } => {
                builder.insert_header((header::RETRY_AFTER, "1"));
            }
            AppError::RateLimited { retry_after } => {
                builder.insert_header((header::RETRY_AFTER, retry_after.to_string()));
            }
            _ => {}
        }

        builder.json(envelope)
    }
}
