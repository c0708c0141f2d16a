//! Tracing subscriber setup shared by the CLI and the preview server.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "info";

/// Build the filter: `RUST_LOG` wins, then `level`, then [`DEFAULT_FILTER`].
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    let fallback = level.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a console subscriber. Repeated calls are no-ops.
pub fn init_logging(level: Option<&str>) {
    let console = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console)
        .try_init();
}
