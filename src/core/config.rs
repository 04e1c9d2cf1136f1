//! Application configuration management
//!
//! The API token is read from the environment only. Everything else comes
//! from an optional TOML file, with a couple of environment overrides, and
//! is validated at startup so a bad setting fails before any request.

use crate::core::constants::{api, env};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default config file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "droplet-inventory.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_exit_on_unauthorized")]
    pub exit_on_unauthorized: bool,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            request_timeout: default_request_timeout(),
            exit_on_unauthorized: default_exit_on_unauthorized(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    api::DEFAULT_BASE_URL.to_string()
}

fn default_per_page() -> u32 {
    api::DEFAULT_PER_PAGE
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_exit_on_unauthorized() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Application configuration
///
/// Built once per invocation and handed to the API client; nothing reads
/// the token from ambient process state after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the DigitalOcean API
    pub api_token: String,

    /// API root, e.g. `https://api.digitalocean.com/v2`
    pub base_url: String,

    /// `per_page` query value sent with every page request
    pub per_page: u32,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Terminate on a 401 instead of treating the page as absent
    pub exit_on_unauthorized: bool,

    /// Logging level
    pub log_level: String,
}

/// Read the API token from the environment
///
/// An unset or blank variable counts as missing.
pub fn api_token_from_env() -> Option<String> {
    std::env::var(env::API_TOKEN)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl Config {
    /// Build configuration with every setting at its default
    pub fn with_defaults(api_token: String) -> Self {
        Self::from_toml(api_token, TomlConfig::default())
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or a value is
    /// invalid.
    pub fn from_file<P: AsRef<Path>>(api_token: String, path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let toml_config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        let config = Self::from_toml(api_token, toml_config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment and optional config file
    ///
    /// The file named by `DROPLET_INVENTORY_CONFIG` must exist when the
    /// variable is set; the default `droplet-inventory.toml` is skipped when
    /// absent. `DO_API_URL` and `LOG_LEVEL` override the file.
    pub fn from_env(api_token: String) -> Result<Self> {
        let mut config = match std::env::var(env::CONFIG_PATH) {
            Ok(path) => Self::from_file(api_token, path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(api_token, DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::with_defaults(api_token),
        };

        if let Ok(base_url) = std::env::var(env::API_URL) {
            config.base_url = base_url;
        }
        if let Ok(level) = std::env::var(env::LOG_LEVEL) {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_toml(api_token: String, toml_config: TomlConfig) -> Self {
        Self {
            api_token,
            base_url: toml_config.api.base_url.trim_end_matches('/').to_string(),
            per_page: toml_config.api.per_page,
            request_timeout: toml_config.api.request_timeout,
            exit_on_unauthorized: toml_config.api.exit_on_unauthorized,
            log_level: toml_config.logging.log_level,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.base_url))?;

        if self.per_page == 0 {
            bail!("per_page must be a positive integer");
        }
        if self.request_timeout == 0 {
            bail!("request_timeout must be a positive number of seconds");
        }
        Ok(())
    }
}
