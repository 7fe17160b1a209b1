use std::io;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr so log lines
/// stay out of the alternate screen. Filtered via `RUST_LOG`, defaulting to
/// info for this crate. Safe to call more than once; later calls are no-ops.
pub fn init_default() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dash_wm=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
