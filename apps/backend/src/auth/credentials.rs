//! CMS administrator credential check.

use crate::config::app::AdminCredentials;

/// Constant-time comparison of 32-byte digests.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// `true` when `username` / `password` match the configured admin.
/// Username and password digests are both compared on every call.
pub fn verify_admin(admin: &AdminCredentials, username: &str, password: &str) -> bool {
    let given_user = blake3::hash(username.trim().as_bytes());
    let expected_user = blake3::hash(admin.username.as_bytes());
    let given_password = blake3::hash(password.as_bytes());

    let user_ok = digests_match(given_user.as_bytes(), expected_user.as_bytes());
    let password_ok = digests_match(given_password.as_bytes(), &admin.password_digest);
    user_ok & password_ok
}
