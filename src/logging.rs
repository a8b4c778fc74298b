//! Tracing setup for the desktop binary.
//!
//! Filtering follows `RUST_LOG`, e.g. `RUST_LOG=datagrid::state=debug` to
//! watch active-cell and edit-session transitions.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
