//! Runtime configuration.
//!
//! Values resolve in three layers: command-line flags (and their `env`
//! fallbacks), then an optional YAML file, then built-in defaults.
//!
//! ```yaml
//! api_base_url: "http://localhost:8080"
//! language: hi
//! request_timeout_secs: 10
//! user_agent: "echo_bulletin/0.1"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::Language;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings as they appear in `config.yaml`; everything optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub language: Option<Language>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let parsed = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: shown.clone(),
            source,
        })?;
        info!(path = %shown, "Loaded configuration file");
        Ok(parsed)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: Url,
    pub language: Language,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Config {
    /// Resolve flags over the optional config file over defaults.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let raw_url = cli
            .api_base_url
            .clone()
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let config = Self {
            api_base_url: parse_base_url(&raw_url)?,
            language: cli.language.or(file.language).unwrap_or_default(),
            request_timeout_secs: cli
                .timeout_secs
                .or(file.request_timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: cli
                .user_agent
                .clone()
                .or(file.user_agent)
                .unwrap_or_else(|| {
                    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                }),
        };
        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::BaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::BaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    Ok(url)
}
