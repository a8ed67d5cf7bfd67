//! Tracing setup for integration test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent. Level from `TEST_LOG`, then `RUST_LOG`, else `warn`; set
/// `TEST_LOG_JSON=1` to get the production JSON format.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt().with_env_filter(filter).with_test_writer();

        if json {
            builder.json().try_init().ok();
        } else {
            builder.without_time().try_init().ok();
        }
    });
}
