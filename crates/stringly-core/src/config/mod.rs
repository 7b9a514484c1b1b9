//! Configuration management
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! YAML file, `STRINGLY_*` environment variables, and finally command-line
//! flags applied by the binary.

use crate::error::{Result, StringlyError};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_CONFIG: &str = "STRINGLY_CONFIG";
pub const ENV_DATA_PATH: &str = "STRINGLY_DATA_PATH";
pub const ENV_PORT: &str = "STRINGLY_PORT";
pub const ENV_HTTPS: &str = "STRINGLY_HTTPS";
pub const ENV_MODE: &str = "STRINGLY_MODE";

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for RunMode {
    type Err = StringlyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(StringlyError::Config(format!(
                "Unknown mode '{}'. Expected: development or production",
                other
            ))),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one JSON file per document
    #[serde(default = "Store::default_path")]
    pub data_dir: PathBuf,

    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve over local TLS (development mode only)
    #[serde(default)]
    pub https: bool,

    #[serde(default)]
    pub mode: RunMode,
}

fn default_port() -> u16 {
    3002
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Store::default_path(),
            port: default_port(),
            https: false,
            mode: RunMode::default(),
        }
    }
}

impl Config {
    /// Load config from `path` (or the default path) and apply the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Config::default()
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from variables resolved by `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_PATH).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.port = port.trim().parse().map_err(|_| {
                StringlyError::Config(format!("{} is not a valid port: {}", ENV_PORT, port))
            })?;
        }
        if let Some(https) = lookup(ENV_HTTPS) {
            self.https = parse_flag(&https);
        }
        if let Some(mode) = lookup(ENV_MODE).filter(|v| !v.is_empty()) {
            self.mode = mode.parse()?;
        }
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// TLS is only ever used in development mode
    pub fn https_enabled(&self) -> bool {
        self.mode == RunMode::Development && self.https
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
