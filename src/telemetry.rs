//! Logging setup and span helpers.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global subscriber. Logs go to stderr; stdout carries records.
pub fn init(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{info_span, Span};

    /// Create a span for one input line.
    pub fn line(number: u64) -> Span {
        info_span!("line", number = number)
    }
}
