// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// - Log lines go to stderr, so `site-flow crawl --json > crawl.json` still
//   produces a clean JSON file on stdout
// - RUST_LOG controls the level (default: info for this crate, warn for the
//   HTTP stack)
//   Examples:
//   - RUST_LOG=debug              -> also show every failed/non-HTML fetch
//   - RUST_LOG=site_flow=warn     -> only warnings
// =============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "site_flow=info,warn";

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init only fails if a subscriber is already installed, which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
