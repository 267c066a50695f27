//! Configuration loading utilities

use crate::schema::Config;
use nowcast_common::{LogFormat, NowcastError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "NOWCAST_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Unsupported configuration file extension
    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for NowcastError {
    fn from(err: ConfigError) -> Self {
        NowcastError::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: an explicit path, else `NOWCAST_CONFIG_PATH`, else
    /// `nowcast.yaml`/`nowcast.toml` in the working directory, else defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(|| {
                ["nowcast.yaml", "nowcast.yml", "nowcast.toml"]
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.exists())
            });

        let mut config = match path {
            Some(path) => Self::load_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parse a configuration file, choosing the format by extension.
    pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Twitter credentials
        if let Some(value) = lookup("ENV_TWITTER_APP_KEY") {
            config.twitter.app_key = value;
        }
        if let Some(value) = lookup("ENV_TWITTER_APP_SECRET") {
            config.twitter.app_secret = value;
        }
        if let Some(value) = lookup("ENV_TWITTER_ACCESS_TOKEN") {
            config.twitter.access_token = value;
        }
        if let Some(value) = lookup("ENV_TWITTER_ACCESS_SECRET") {
            config.twitter.access_secret = value;
        }

        // Archive storage
        if let Some(value) = lookup("ENV_R2_ENDPOINT") {
            config.storage.endpoint = Some(value).filter(|v| !v.is_empty());
        }
        if let Some(value) = lookup("ENV_R2_ACCESS_KEY_ID") {
            config.storage.access_key_id = value;
        }
        if let Some(value) = lookup("ENV_R2_SECRET_KEY") {
            config.storage.secret_access_key = value;
        }
        if let Some(value) = lookup("R2_BUCKET_NAME") {
            config.storage.bucket = value;
        }
        if let Some(value) = lookup("ENV_R2_REGION") {
            config.storage.region = value;
        }
        if let Some(value) = lookup("NOWCAST_ARCHIVE_KEY") {
            config.storage.archive_key = value;
        }

        // Charts
        if let Some(value) = lookup("NOWCAST_OUTPUT_DIR") {
            config.charts.output_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("NOWCAST_CHART_WIDTH") {
            config.charts.width = parse_var("NOWCAST_CHART_WIDTH", &value)?;
        }
        if let Some(value) = lookup("NOWCAST_CHART_HEIGHT") {
            config.charts.height = parse_var("NOWCAST_CHART_HEIGHT", &value)?;
        }
        if let Some(value) = lookup("NOWCAST_FONT_FAMILY") {
            config.charts.font_family = value;
        }
        if let Some(value) = lookup("NOWCAST_FONT_PATH") {
            config.charts.font_path = Some(PathBuf::from(value)).filter(|p| !p.as_os_str().is_empty());
        }

        // Summary and logging
        if let Some(value) = lookup("NOWCAST_LANGUAGE") {
            config.summary.language = value;
        }
        if let Some(value) = lookup("NOWCAST_TARGET_PLACE") {
            config.summary.target_place = value;
        }
        if let Some(value) = lookup("NOWCAST_LOG_LEVEL") {
            config.logging.level = value;
        }
        if let Some(value) = lookup("NOWCAST_LOG_FORMAT") {
            config.logging.format = match value.to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::EnvParseError {
                        var: "NOWCAST_LOG_FORMAT".to_string(),
                        source: format!("unknown log format '{}'", value).into(),
                    })
                }
            };
        }
        if let Some(value) = lookup("NOWCAST_LOG_FILE") {
            config.logging.file_path = Some(PathBuf::from(value));
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
