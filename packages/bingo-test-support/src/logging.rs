//! Test logging, installed at most once per test binary.
//!
//! `TEST_LOG=bingo_backend=debug` shows sheet match progress and draw
//! fan-out while a test runs.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet by default; full draw runs log a line per match at debug.
pub const DEFAULT_DIRECTIVE: &str = "warn";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// `TEST_LOG` beats `RUST_LOG`. Blank values count as unset.
pub fn directive_from(test_log: Option<String>, rust_log: Option<String>) -> String {
    [test_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

pub fn init() {
    INSTALLED.get_or_init(|| {
        let directive = directive_from(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter =
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be global (e.g. a test that set one
        // up itself); losing that race is fine.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
