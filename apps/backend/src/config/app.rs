//! Application configuration loaded from environment variables.

use std::env;

use db_infra::config::db::{DbKind, RuntimeEnv};

use crate::error::AppError;

const MIN_JWT_SECRET_LEN: usize = 32;
const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 256 * 1024;

/// CMS administrator credentials. The password is kept only as a blake3 digest.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_digest: [u8; 32],
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_digest: *blake3::hash(password.as_bytes()).as_bytes(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_digest", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub runtime_env: RuntimeEnv,
    pub db_kind: DbKind,

    pub jwt_secret: String,
    /// `None` disables CMS login (only allowed outside prod).
    pub admin: Option<AdminCredentials>,

    pub cors_allowed_origins: Vec<String>,
    pub max_json_payload_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let runtime_env = match env::var("RUNTIME_ENV") {
            Ok(v) if v.eq_ignore_ascii_case("test") => RuntimeEnv::Test,
            _ => RuntimeEnv::Prod,
        };
        let db_kind = match env::var("DB_KIND") {
            Ok(v) => v.parse::<DbKind>()?,
            Err(_) => DbKind::Postgres,
        };

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_JWT_SECRET_LEN => secret,
            Ok(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET is too short; use at least {MIN_JWT_SECRET_LEN} characters"
                )))
            }
            Err(_) => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };

        let admin = match (
            env::var("CMS_ADMIN_USERNAME").ok().filter(|v| !v.trim().is_empty()),
            env::var("CMS_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(user), Some(password)) => Some(AdminCredentials::new(user.trim(), &password)),
            _ if runtime_env == RuntimeEnv::Prod => {
                return Err(AppError::config(
                    "CMS_ADMIN_USERNAME and CMS_ADMIN_PASSWORD must be set in production",
                ))
            }
            _ => None,
        };

        let cors_allowed_origins =
            parse_allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let max_json_payload_size = env::var("MAX_JSON_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_JSON_PAYLOAD_SIZE);

        Ok(Config {
            host,
            port,
            runtime_env,
            db_kind,
            jwt_secret,
            admin,
            cors_allowed_origins,
            max_json_payload_size,
        })
    }
}

/// Comma-separated origins; blanks, `null` and non-http(s) entries are dropped.
/// Falls back to the local dev front-end when nothing valid remains.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        origins
    }
}
