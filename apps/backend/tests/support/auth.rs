//! JWT token generation helpers for tests

use std::time::{Duration, SystemTime};

use backend::auth::jwt::mint_access_token;
use backend::state::security_config::SecurityConfig;

/// Mint a bearer token for `sub` (without the "Bearer " prefix).
pub fn mint_test_token(sub: &str, sec: &SecurityConfig) -> String {
    mint_access_token(sub, SystemTime::now(), sec)
        .expect("should mint token successfully")
        .0
}

/// `Authorization` value for the configured CMS admin.
pub fn admin_bearer(sec: &SecurityConfig) -> String {
    let admin = sec.admin.as_ref().expect("test security config has an admin");
    bearer_header(&admin.username, sec)
}

pub fn bearer_header(sub: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, sec))
}

/// Token issued two hours ago, long past its 15 minute lifetime.
pub fn expired_admin_bearer(sec: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .unwrap();
    let token = mint_access_token("admin", past, sec)
        .expect("should mint expired token successfully")
        .0;
    format!("Bearer {token}")
}
