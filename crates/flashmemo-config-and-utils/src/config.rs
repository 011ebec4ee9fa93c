//! Configuration management for the client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default API base URL (can be overridden at compile time via FLASHMEMO_API_URL env var).
pub const DEFAULT_API_URL: &str = match option_env!("FLASHMEMO_API_URL") {
    Some(url) => url,
    None => "http://localhost:3333",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime override for the API base URL.
pub const ENV_API_URL: &str = "FLASHMEMO_API_URL";

/// Runtime override for the log level.
pub const ENV_LOG_LEVEL: &str = "FLASHMEMO_LOG_LEVEL";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the flashcard REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Timeout applied to every HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Load configuration from the config file if it exists, falling back to
    /// defaults, then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| CoreError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self).map_err(CoreError::ConfigEncode)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override fields from environment-style variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(log_level) = non_empty(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(api_url) = non_empty(ENV_API_URL) {
            self.api_url = api_url;
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> CoreResult<()> {
        let url = self.api_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: format!("scheme must be http or https, got {}", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::ZeroTimeout);
        }
        Ok(())
    }

    /// Get the API base URL as a parsed URL.
    pub fn api_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_url).map_err(|e| CoreError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
