//! Logging utilities
//!
//! The crate logs through the `log` facade. Binaries install `env_logger`
//! with one of the functions below; `RUST_LOG` always takes precedence.

pub use log::{debug, error, info, trace, warn};

use env_logger::Env;

/// Initialize the logging system at the `info` level
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with a default filter
///
/// Calling this more than once keeps the first logger.
pub fn init_with_level(level: &str) {
    if env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}
