//! Common types and utilities for nasconv
//!
//! This crate provides the logging setup, configuration loading and error
//! type shared by the nasconv crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::LoggingConfig;
pub use error::Error;
pub use logging::{
    init_logging, init_logging_from_config, init_logging_with_filter,
    log_nas_ie, Direction, HexDump, LogLevel, TARGET_CONVERT, TARGET_MESSAGE,
};
