// ABOUTME: Shared plumbing for the shopx admin binary
// ABOUTME: Wires config, catalog store, admin auth and settings into one context

pub mod context;
pub mod error;
pub mod logging;

pub use context::{parse_ids, AppContext};
pub use error::{CliError, CliResult};
pub use logging::init_tracing;
