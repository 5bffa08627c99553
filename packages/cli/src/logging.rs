use calculator_config::constants;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the built-in default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(constants::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
