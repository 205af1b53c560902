use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV_VAR: &str = "OMDB_API_KEY";

/// Why the config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `<config_dir>/moviefinder/config.toml`, or `./moviefinder/config.toml`
    /// when the platform has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moviefinder")
            .join("config.toml")
    }

    /// Load and validate `path`. A missing file is the default config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client or the debouncer cannot work with: a base
    /// URL that is not absolute http(s), zero timeouts, zero debounce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::ValidationError {
                message: format!("Invalid api.base_url '{}': {}", self.api.base_url, e),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url must use http or https, got '{}'", url.scheme()),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api timeouts must be greater than zero".to_string(),
            });
        }

        if self.search.debounce_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "search.debounce_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Resolves the API key: `OMDB_API_KEY` wins over the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV_VAR).ok();
        pick_api_key(from_env, self.api.api_key.clone())
    }

    /// Storage file path, honoring `storage.path` when set.
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(|| data_dir().join("storage.json"))
    }

    /// Log file used while the terminal UI owns stdout.
    pub fn log_path(&self) -> PathBuf {
        data_dir().join("moviefinder.log")
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moviefinder")
}

fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    [from_env, from_file]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
