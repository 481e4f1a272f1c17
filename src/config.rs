//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chain::ChainClientConfig;
use crate::feed::FeedClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Off-chain feed service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_service_url")]
    pub url: String,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_service_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_page_size() -> u64 {
    20
}

fn default_request_timeout() -> u64 {
    5000
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            page_size: default_page_size(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl FeedConfig {
    pub fn client_config(&self) -> FeedClientConfig {
        FeedClientConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Chain indexer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_service_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ChainConfig {
    pub fn client_config(&self) -> ChainClientConfig {
        ChainClientConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> String {
        format!("chainblog={}", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chainblog").join("config.toml")),
            Some(PathBuf::from("./chainblog.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CHAINBLOG_FEED_URL") {
            self.feed.url = url;
        }
        if let Ok(size) = std::env::var("CHAINBLOG_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.feed.page_size = n;
            }
        }

        if let Ok(url) = std::env::var("CHAINBLOG_CHAIN_URL") {
            self.chain.url = url;
        }

        if let Ok(level) = std::env::var("CHAINBLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CHAINBLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chainblog Configuration
#
# Environment variables override these settings:
# - CHAINBLOG_FEED_URL
# - CHAINBLOG_PAGE_SIZE
# - CHAINBLOG_CHAIN_URL
# - CHAINBLOG_LOG_LEVEL
# - CHAINBLOG_LOG_FORMAT

[feed]
# Off-chain feed service URL
url = "http://localhost:3001"

# Records requested per page
page_size = 20

# Request timeout in milliseconds
request_timeout_ms = 5000

[chain]
# Chain indexer URL
url = "http://localhost:3001"

# Request timeout in milliseconds
request_timeout_ms = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.feed.page_size, 20);
        assert_eq!(config.chain.url, "http://localhost:3001");
        assert_eq!(config.logging.filter_directive(), "chainblog=info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.feed.url, "http://localhost:3001");
        assert_eq!(config.feed.request_timeout_ms, 5000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\npage_size = 10\n\n[logging]\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.url, "http://localhost:3001");
        assert!(config.logging.is_json());

        let client = config.feed.client_config();
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed\npage_size = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
