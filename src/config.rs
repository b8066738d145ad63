//! Configuration for the sanitext CLI.
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! [path]
//! allow_navigation = false
//!
//! [url]
//! require_protocol = true
//!
//! [log]
//! level = "info"
//! format = "text"   # or "json"
//! ```
//!
//! Every key is optional. Without `--config`, `./sanitext.toml` is used if
//! present, then `<config dir>/sanitext/config.toml`, then the defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::security::UrlPolicy;

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "sanitext.toml";

const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Root configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub path: PathConfig,
    pub url: UrlConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    /// Keep a leading `./` or `../` on sanitized paths.
    pub allow_navigation: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlConfig {
    pub require_protocol: bool,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            require_protocol: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load configuration, honoring an explicit path first.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if the selected
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// First existing config file among the default locations.
    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("sanitext").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - A key is unknown or has the wrong type
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the log level is not one of
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut warnings = Vec::new();

        let level = self.log.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Valid levels: {}",
                self.log.level,
                VALID_LOG_LEVELS.join(", ")
            );
        }

        if !self.url.require_protocol {
            warnings.push(
                "url.require_protocol is false: URLs without http:// or https:// are accepted"
                    .to_string(),
            );
        }

        if self.path.allow_navigation {
            warnings.push(
                "path.allow_navigation is true: sanitized paths may start with ./ or ../"
                    .to_string(),
            );
        }

        Ok(ValidationResult { warnings })
    }

    /// URL policy derived from `url.require_protocol`.
    pub fn url_policy(&self) -> UrlPolicy {
        UrlPolicy::from_require_protocol(self.url.require_protocol)
    }
}
