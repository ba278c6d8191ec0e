// ABOUTME: Tracing subscriber setup for the shopx binary
// ABOUTME: Honors RUST_LOG and falls back to a quiet default so table output stays readable

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global fmt subscriber. `verbose` raises the fallback
/// filter to `info` when RUST_LOG is unset.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { DEFAULT_FILTER };

    // A second call (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
