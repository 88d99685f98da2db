//! Logging utilities for the Reservify service.
//!
//! Sets up the `tracing` subscriber shared by every crate in the workspace.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use reservify_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; `level` applies to the `reservify*` targets and
/// HTTP request traces from `tower_http`. Calling this more than once is a
/// no-op.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in ["reservify", "tower_http"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
///
/// # Arguments
///
/// * `error` - The error to log.
/// * `context` - Additional context information about the error.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
