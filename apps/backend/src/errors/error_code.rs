//! Error codes for the site backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that
//! appears in the `code` member of a failure envelope.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Login with wrong username or password
    InvalidCredentials,
    /// Access denied
    Forbidden,

    // Request Validation
    /// Field-level validation failed
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Body is not valid JSON for the endpoint
    InvalidJson,
    /// Query string could not be parsed
    InvalidQuery,
    /// Path parameter could not be parsed
    InvalidPath,
    /// Path exists but not for this HTTP method
    MethodNotAllowed,
    /// Per-IP request budget exhausted
    RateLimited,

    // Resource Not Found
    /// Route or generic resource not found
    NotFound,
    ContactNotFound,
    DomainContactNotFound,
    ArticleNotFound,
    EquipmentNotFound,
    PageContentNotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Conflicts
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,
    /// Article slug already in use
    SlugConflict,
    /// Equipment SKU already in use
    SkuConflict,
    /// Unique constraint violation without a more specific mapping
    UniqueViolation,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout or pool exhaustion
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Stored data failed to decode
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidPath => "INVALID_PATH",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::RateLimited => "RATE_LIMITED",

            Self::NotFound => "NOT_FOUND",
            Self::ContactNotFound => "CONTACT_NOT_FOUND",
            Self::DomainContactNotFound => "DOMAIN_CONTACT_NOT_FOUND",
            Self::ArticleNotFound => "ARTICLE_NOT_FOUND",
            Self::EquipmentNotFound => "EQUIPMENT_NOT_FOUND",
            Self::PageContentNotFound => "PAGE_CONTENT_NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Conflict => "CONFLICT",
            Self::SlugConflict => "SLUG_CONFLICT",
            Self::SkuConflict => "SKU_CONFLICT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
