//! Tracing setup shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Quiet by default; SQL drivers stay at `warn` even when the app is turned up.
const DEFAULT_FILTER: &str = "warn";
const DRIVER_FILTER: &str = "sqlx=warn,sea_orm=warn";

fn filter() -> EnvFilter {
    let directives = std::env::var("SITE_TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    EnvFilter::new(format!("{directives},{DRIVER_FILTER}"))
}

/// Install the test subscriber once per process.
///
/// Level comes from `SITE_TEST_LOG`, then `RUST_LOG`. Set
/// `SITE_TEST_LOG_JSON=1` to get the same JSON lines production emits.
/// Output goes through the test writer so cargo captures it per test.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let json = std::env::var("SITE_TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt().with_env_filter(filter()).with_test_writer();
        // Another subscriber may already be installed; keep it.
        let _ = if json {
            builder.json().flatten_event(true).try_init()
        } else {
            builder.without_time().try_init()
        };
    });
}
