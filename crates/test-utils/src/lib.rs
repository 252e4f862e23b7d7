//! Shared test utilities for the support assistant crates.
//!
//! - [`fixtures`] - valid rules, rule sets and issue drafts
//! - [`assertions`] - formatting helpers for snapshot tests
//! - [`init_tracing`] - opt-in log output while debugging a test

pub mod assertions;
pub mod fixtures;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
            )
            .with_test_writer()
            .try_init();
    });
}
