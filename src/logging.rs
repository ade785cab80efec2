//! Diagnostic logging setup.
//!
//! Logs go to stderr; stdout is reserved for the instruction text an agent
//! parses. `RUST_LOG` overrides the level taken from the workflow definition.

use crate::config::LoggingLevel;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with `level` as the default filter.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: LoggingLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(LoggingLevel::Debug);
        init_logging(LoggingLevel::Error);
    }
}
