//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with the report on stdout. `RUST_LOG`
//! wins when set; otherwise only warnings are shown, or debug output for this
//! crate with `--verbose`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber; later calls are ignored
pub fn init_tracing(verbose: bool) {
  let default_directive = if verbose { "warn,release_tickets=debug" } else { "warn" };
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .try_init()
    .ok();
}
