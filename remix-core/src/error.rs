//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Resource Library
//!
//! Every fallible library operation returns `Result<T, AppError>`. The binary
//! wraps these in `anyhow` at its edges.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::data::CatalogError;
use crate::logging::LoggingError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config values that parse but make no sense.
    #[error("Invalid config: {field} - {message}")]
    InvalidConfig { field: String, message: String },

    /// No platform config directory could be determined.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Dataset could not be loaded or failed validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Clipboard access failed outside the non-fatal UI paths.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] clipr::ClipError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Route argument that names no route.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    #[must_use]
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        Self::Other(format!("{}: {}", ctx.into(), self))
    }

    /// Create a config validation error
    pub fn invalid_config<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = AppError::invalid_config("keys.remix", "must differ from keys.share");
        assert_eq!(
            err.to_string(),
            "Invalid config: keys.remix - must differ from keys.share"
        );
        assert!(
            err.with_context("loading")
                .to_string()
                .starts_with("Unexpected error: loading: Invalid config")
        );
    }
}
