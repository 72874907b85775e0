// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator configuration: a TOML file overlaid by environment variables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::watches::WATCHES_FILE;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "CHART_OPERATOR_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "chart-operator.toml";

const PROJECT_DIR_ENV: &str = "CHART_OPERATOR_PROJECT_DIR";
const LOG_LEVEL_ENV: &str = "CHART_OPERATOR_LOG_LEVEL";
const LOG_FORMAT_ENV: &str = "CHART_OPERATOR_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorConfig {
    /// Project holding `watches.yaml` and the charts.
    pub project_dir: PathBuf,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl OperatorConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.with_env_lookup(|var| std::env::var(var).ok())
    }

    /// Overlay values returned by `lookup`. Empty values are ignored.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(dir) = get(PROJECT_DIR_ENV) {
            self.project_dir = PathBuf::from(dir);
        }
        if let Some(level) = get(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        if let Some(format) = get(LOG_FORMAT_ENV) {
            self.log_format = format.parse().map_err(|value| ConfigError::InvalidEnv {
                var: LOG_FORMAT_ENV,
                value,
            })?;
        }
        Ok(self)
    }

    pub fn watches_path(&self) -> PathBuf {
        self.project_dir.join(WATCHES_FILE)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
