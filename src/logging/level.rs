//! Command-line log level names.
//!
//! The hook accepts the level names container tooling already passes to it,
//! including `warning`, `fatal` and `panic`.
use log::LevelFilter;

use crate::constants::LOG_LEVELS;
use crate::types::errors::{Error, ErrorKind, Result};

/// Parse a command-line log level.
///
/// # Errors
///
/// Returns an error naming the accepted levels for anything not in [`LOG_LEVELS`].
pub fn parse_log_level(s: &str) -> Result<LevelFilter> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" | "fatal" | "panic" => Ok(LevelFilter::Error),
        _ => Err(Error::new(
            ErrorKind::UnknownArgument,
            format!(
                "log level {s:?} is not supported, choose from: {}",
                LOG_LEVELS.join(", ")
            ),
        )),
    }
}
