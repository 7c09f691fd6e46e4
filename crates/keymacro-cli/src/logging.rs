//! Diagnostic logging for the command line tool.
//!
//! Configure via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - parse and generation summaries
//! - `RUST_LOG=keymacro=trace` - every construct the parser had to degrade
//!
//! Logs go to stderr so that stdout only ever carries the generated script.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
