//! Logging configuration
//!
//! The NAS conversion library itself has no tunables; the only process-level
//! knobs are the ones controlling diagnostics output. They are loaded from YAML
//! the same way every other nasconv configuration is.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::logging::LogLevel;

/// Diagnostics configuration.
///
/// # Example
/// ```
/// use nasconv_common::{LoggingConfig, LogLevel};
///
/// let yaml = r#"
/// level: debug
/// report_caller: true
/// "#;
///
/// let config = LoggingConfig::from_yaml(yaml).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert!(config.report_caller);
/// assert!(config.with_target);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no filter is given
    pub level: LogLevel,
    /// Include source file and line number in each event
    pub report_caller: bool,
    /// Include the event target (`nasconv::convert`, `nasconv::message`)
    pub with_target: bool,
    /// Optional `EnvFilter` directive string, overrides `level`
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            report_caller: false,
            with_target: true,
            filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with the given level and defaults elsewhere.
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Parses a logging configuration from a YAML string.
    ///
    /// Missing fields take their default values. A filter directive that
    /// `tracing-subscriber` cannot parse is reported as [`Error::Config`].
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a logging configuration from a YAML file.
    ///
    /// # Example
    /// ```no_run
    /// use nasconv_common::LoggingConfig;
    ///
    /// let config = LoggingConfig::from_yaml_file("config/logging.yaml").unwrap();
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the filter directive string that will be handed to `EnvFilter`.
    pub fn directives(&self) -> String {
        match &self.filter {
            Some(filter) => filter.clone(),
            None => self.level.to_string(),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if let Some(filter) = &self.filter {
            EnvFilter::try_new(filter)
                .map_err(|e| Error::Config(format!("invalid filter '{filter}': {e}")))?;
        }
        Ok(())
    }
}
