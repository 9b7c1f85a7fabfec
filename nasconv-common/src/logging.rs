//! Logging infrastructure for nasconv
//!
//! This module provides configurable logging using the `tracing` crate and
//! a hex formatter for dumping NAS payloads at trace level.
//!
//! Library code never installs a subscriber; it only emits events under the
//! targets below. Applications call one of the `init_*` functions once.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::config::LoggingConfig;

/// Target for events about whole NAS messages and IE payloads
pub const TARGET_MESSAGE: &str = "nasconv::message";

/// Target for events emitted by the IE conversion routines
pub const TARGET_CONVERT: &str = "nasconv::convert";

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// The log level can be overridden by the `RUST_LOG` environment variable.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Example
///
/// ```
/// use nasconv_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    init_logging_from_config(&LoggingConfig::with_level(level));
}

/// Initialize logging with a custom filter string.
///
/// # Example
///
/// ```
/// use nasconv_common::logging::init_logging_with_filter;
///
/// // Default to info, but trace the PCO/timer conversion routines
/// init_logging_with_filter("info,nasconv::convert=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    init_logging_from_config(&LoggingConfig {
        filter: Some(filter.to_string()),
        ..LoggingConfig::default()
    });
}

/// Initialize logging from a [`LoggingConfig`].
///
/// `report_caller` adds source file and line to every event.
pub fn init_logging_from_config(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_file(config.report_caller)
        .with_line_number(config.report_caller)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init();

    if result.is_err() {
        tracing::debug!("global subscriber already installed, keeping it");
    }
}

/// Protocol direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Incoming/received payload
    Rx,
    /// Outgoing/transmitted payload
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Log a NAS IE payload at debug level with a hex dump at trace level.
///
/// # Example
///
/// ```
/// use nasconv_common::logging::{log_nas_ie, Direction};
///
/// let data = vec![0x80, 0x00, 0x0d, 0x00];
/// log_nas_ie(Direction::Tx, "Protocol Configuration Options", &data);
/// ```
pub fn log_nas_ie(direction: Direction, ie_name: &str, data: &[u8]) {
    tracing::debug!(
        target: TARGET_MESSAGE,
        direction = %direction,
        ie = ie_name,
        len = data.len(),
        "{} NAS IE",
        direction
    );
    tracing::trace!(
        target: TARGET_MESSAGE,
        ie = ie_name,
        hex = %HexDump(data),
        "IE payload"
    );
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
