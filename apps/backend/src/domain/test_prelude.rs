//! Shared proptest configuration for domain property tests.

use proptest::test_runner::Config;

/// `PROPTEST_CASES` overrides the default of 128 cases.
pub fn proptest_config() -> Config {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(128);
    Config {
        cases,
        ..Config::default()
    }
}
