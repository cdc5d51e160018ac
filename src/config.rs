//! Client configuration with hierarchical loading
//!
//! Configuration is merged from programmatic defaults, an optional
//! `atlan.yaml` file in the working directory, and `ATLAN_`-prefixed
//! environment variables (highest priority).

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Base URL cannot be empty; set ATLAN_BASE_URL or base_url in atlan.yaml")]
    EmptyBaseUrl,

    #[error("Invalid base URL \"{0}\": {1}")]
    InvalidBaseUrl(String, String),

    #[error("API key cannot be empty; set ATLAN_API_KEY or api_key in atlan.yaml")]
    EmptyApiKey,

    #[error("Invalid timeout: {0}s. Must be between 1 and 600")]
    InvalidTimeout(u64),

    #[error("Failed to load configuration: {0}")]
    LoadFailed(#[from] Box<figment::Error>),
}

/// Connection settings for an Atlan workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlanConfig {
    /// Base URL of the Atlan instance (e.g. `https://tenant.atlan.com`)
    pub base_url: String,

    /// Bearer token used for authentication
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AtlanConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl AtlanConfig {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `atlan.yaml` in the working directory (optional)
    /// 3. Environment variables (`ATLAN_*` prefix)
    pub fn load() -> Result<Self, ConfigError> {
        let config: AtlanConfig = Figment::new()
            .merge(Serialized::defaults(AtlanConfig::default()))
            .merge(Yaml::file("atlan.yaml"))
            .merge(Env::prefixed("ATLAN_"))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from defaults and environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: AtlanConfig = Figment::new()
            .merge(Serialized::defaults(AtlanConfig::default()))
            .merge(Env::prefixed("ATLAN_"))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config: AtlanConfig = Figment::new()
            .merge(Serialized::defaults(AtlanConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(ConfigError::InvalidBaseUrl(
                    self.base_url.clone(),
                    format!("unsupported scheme \"{}\"", url.scheme()),
                ));
            }
            Err(e) => {
                return Err(ConfigError::InvalidBaseUrl(
                    self.base_url.clone(),
                    e.to_string(),
                ));
            }
        }

        if self.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ConfigError::InvalidTimeout(self.timeout_secs));
        }

        Ok(())
    }
}
