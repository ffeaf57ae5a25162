use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::app::AdminCredentials;

/// Access tokens live for 15 minutes.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// JWT settings and CMS administrator credentials.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
    /// `None` means CMS login is disabled.
    pub admin: Option<AdminCredentials>,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: ACCESS_TOKEN_TTL,
            admin: None,
        }
    }

    pub fn with_admin(mut self, admin: Option<AdminCredentials>) -> Self {
        self.admin = admin;
        self
    }

    /// Fixed secret plus `admin` / `admin-password` credentials.
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_for_site_backend_only_0123".to_vec())
            .with_admin(Some(AdminCredentials::new("admin", "admin-password")))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
