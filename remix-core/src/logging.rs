//! src/logging.rs
//! ============================================================================
//! # Logging: tracing subscriber setup
//!
//! The TUI owns stdout, so interactive sessions log JSON lines to a rolling
//! file through a non-blocking appender. One-shot subcommands log plain text
//! to stderr instead. `RUST_LOG` directives are layered on top of the
//! configured level.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, filter::Directive, fmt::time::ChronoLocal, layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory for log files; the platform data dir when unset.
    pub log_dir: Option<PathBuf>,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub max_log_files: usize,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    Daily,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Self::NEVER,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_file_prefix: CompactString::const_new("remix"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), LoggingError> {
        if self.log_file_prefix.trim().is_empty() {
            return Err(LoggingError::ConfigError(
                "Log file prefix must not be empty".to_string(),
            ));
        }

        if self.max_log_files == 0 {
            return Err(LoggingError::ConfigError(
                "Max log files must be greater than 0".to_string(),
            ));
        }

        Directive::from_str(&self.log_level)
            .map_err(|e| LoggingError::ConfigError(format!("Invalid log level: {e}")))?;

        if let Some(dir) = &self.log_dir {
            validate_log_directory(dir)?;
        }
        Ok(())
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        let directive = Directive::from_str(&self.log_level)
            .map_err(|e| LoggingError::ConfigError(format!("Invalid log level: {e}")))?;
        Ok(EnvFilter::from_default_env().add_directive(directive))
    }
}

fn validate_log_directory(path: &Path) -> Result<(), LoggingError> {
    if path.components().count() == 0 {
        return Err(LoggingError::InvalidLogDirectory("Empty path".to_string()));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(LoggingError::InvalidLogDirectory(
            "Path contains parent directory references".to_string(),
        ));
    }

    Ok(())
}

pub struct Logger;

impl Logger {
    /// Install the JSON file subscriber. The returned guard flushes pending
    /// lines on drop and must live as long as the app.
    pub fn init_tracing(config: &LoggerConfig, default_dir: &Path) -> Result<WorkerGuard, LoggingError> {
        config.validate()?;
        let log_dir = config.log_dir.as_deref().unwrap_or(default_dir);
        std::fs::create_dir_all(log_dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(config.rotation.into())
            .filename_prefix(config.log_file_prefix.as_str())
            .filename_suffix("log")
            .max_log_files(config.max_log_files)
            .build(log_dir)
            .map_err(|e| LoggingError::ConfigError(e.to_string()))?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoLocal::rfc_3339())
            .with_writer(writer)
            .with_filter(config.env_filter()?);

        tracing_subscriber::registry()
            .with(json_layer)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        info!(
            marker = "LOGGER_READY",
            dir = %log_dir.display(),
            level = %config.log_level,
            "File logging initialized"
        );
        Ok(guard)
    }

    /// Plain stderr logging for one-shot subcommands.
    pub fn init_stderr(config: &LoggerConfig) -> Result<(), LoggingError> {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(config.env_filter()?);

        tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn parent_dir_references_are_rejected() {
        let config = LoggerConfig {
            log_dir: Some(PathBuf::from("../logs")),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoggingError::InvalidLogDirectory(_))
        ));
    }

    #[test]
    fn bad_level_is_rejected() {
        let config = LoggerConfig {
            log_level: CompactString::const_new("remix_core=loud"),
            ..LoggerConfig::default()
        };
        assert!(matches!(config.validate(), Err(LoggingError::ConfigError(_))));
    }

    #[test]
    fn rotation_parses_lowercase() {
        let config: LoggerConfig = toml::from_str("rotation = \"hourly\"").unwrap();
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert_eq!(config.log_level, "info");
    }
}
