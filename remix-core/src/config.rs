//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! User-editable settings stored as TOML at the platform config path
//! resolved through [`directories`](https://docs.rs/directories), or at an
//! explicit `--config` path.
//!
//! ## Features
//! - First run writes the defaults so users have something to edit
//! - Async load/save on Tokio
//! - Validation at load time; bad values are reported, never guessed around
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clipr::ClipboardConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::info;

use crate::error::AppError;
use crate::logging::LoggerConfig;

const QUALIFIER: &str = "design";
const ORGANIZATION: &str = "remixed";
const APPLICATION: &str = "remix";

/// Toast lifetimes per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    #[serde(with = "humantime_serde")]
    pub copy_duration: Duration,

    #[serde(with = "humantime_serde")]
    pub remix_duration: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            copy_duration: Duration::from_millis(1500),
            remix_duration: Duration::from_millis(3000),
        }
    }
}

/// Public site the share links point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub site_origin: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            site_origin: "https://remixed.design".to_string(),
        }
    }
}

/// Dataset used when `--data` is not given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
}

/// Single-character bindings that users may remap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub remix: char,

    pub share: char,

    pub search: char,

    pub shortcuts: char,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            remix: 'r',
            share: 's',
            search: '/',
            shortcuts: '?',
        }
    }
}

impl KeyConfig {
    /// Reserved by the listing for quit and clear.
    const RESERVED: [char; 3] = ['q', 'a', ' '];

    pub fn validate(&self) -> Result<(), AppError> {
        let bindings = [
            ("keys.remix", self.remix),
            ("keys.share", self.share),
            ("keys.search", self.search),
            ("keys.shortcuts", self.shortcuts),
        ];

        for (i, (field, key)) in bindings.iter().enumerate() {
            if key.is_control() || key.is_whitespace() {
                return Err(AppError::invalid_config(*field, "must be a printable character"));
            }
            if Self::RESERVED.contains(key) {
                return Err(AppError::invalid_config(
                    *field,
                    format!("'{key}' is reserved"),
                ));
            }
            if let Some((other, _)) = bindings[i + 1..].iter().find(|(_, k)| k == key) {
                return Err(AppError::invalid_config(
                    *field,
                    format!("'{key}' is also bound to {other}"),
                ));
            }
        }
        Ok(())
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub keys: KeyConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,

    #[serde(default)]
    pub logging: LoggerConfig,
}

impl Config {
    /// Loads config from the platform config dir, writing defaults if the
    /// file does not exist yet.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            info!(path = %path.display(), "Loading config");
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            let cfg: Self = toml::from_str(&text)?;
            cfg.validate()?;
            Ok(cfg)
        } else {
            info!(
                path = %path.display(),
                "No config file found, writing defaults"
            );
            let default_config = Self::default();
            default_config.save_to(path).await?;
            Ok(default_config)
        }
    }

    /// Saves config to the platform config dir.
    pub async fn save(&self) -> Result<(), AppError> {
        let path = Self::config_path()?;
        self.save_to(&path).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!(path = %path.display(), "Saving config");

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.toast.copy_duration.is_zero() {
            return Err(AppError::invalid_config("toast.copy_duration", "must be greater than 0"));
        }
        if self.toast.remix_duration.is_zero() {
            return Err(AppError::invalid_config("toast.remix_duration", "must be greater than 0"));
        }

        let origin = self.share.site_origin.trim();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(AppError::invalid_config(
                "share.site_origin",
                "must be an http(s) origin",
            ));
        }

        self.keys.validate()?;
        self.clipboard
            .validate()
            .map_err(|e| AppError::invalid_config("clipboard", e.to_string()))?;
        self.logging
            .validate()
            .map_err(|e| AppError::invalid_config("logging", e.to_string()))?;
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Default directory for rolling log files.
    pub fn log_dir() -> Result<PathBuf, AppError> {
        Ok(Self::project_dirs()?.data_local_dir().join("logs"))
    }

    fn project_dirs() -> Result<ProjectDirs, AppError> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(AppError::NoConfigDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.toast.copy_duration, Duration::from_millis(1500));
        assert_eq!(config.toast.remix_duration, Duration::from_millis(3000));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [toast]
            remix_duration = "5s"

            [keys]
            share = "l"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.toast.remix_duration, Duration::from_secs(5));
        assert_eq!(cfg.toast.copy_duration, Duration::from_millis(1500));
        assert_eq!(cfg.keys.share, 'l');
        assert_eq!(cfg.keys.remix, 'r');
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn clashing_keys_are_rejected() {
        let mut config = Config::default();
        config.keys.share = 'r';
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { ref field, .. } if field == "keys.remix"));

        config.keys.share = 'q';
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_origin_is_rejected() {
        let mut config = Config::default();
        config.share.site_origin = "remixed.design".into();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).await.unwrap();
        assert_eq!(reloaded, loaded);
    }

    #[tokio::test]
    async fn invalid_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[toast]\ncopy_duration = \"0s\"\n")
            .await
            .unwrap();

        let err = Config::load_from(&path).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { .. }));
    }
}
