//! Configuration management for readit.
//!
//! Configuration is read from `~/.config/readit/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::fetcher::{EnrichmentConfig, LoaderConfig};
use crate::normalizer::LinkConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub links: LinkConfig,
    pub enrichment: EnrichmentConfig,
    pub loader: LoaderConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/readit/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("readit").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# readit configuration

[links]
# Scheme used for links rewritten inside comment and post bodies
internal_scheme = "readIt"

# Links containing this domain are treated as internal
host_domain = "reddit.com"

# Keep the full URL as link text instead of replacing it with the host name
show_original_url = false

[enrichment]
# Maximum number of post-info fetches in flight
concurrency = 10

# Per-attempt timeout in seconds
timeout_secs = 30

# Attempts per record before giving up
max_attempts = 3

# Backoff before the first retry, doubled on each further retry (milliseconds)
initial_backoff_ms = 1000

# Upper bound for the backoff delay (milliseconds)
max_backoff_ms = 10000

[loader]
# Site the scraper reads pages from
base_url = "https://old.reddit.com"

# Request timeout in seconds
timeout_secs = 30
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.links.internal_scheme, "readIt");
        assert!(!config.links.show_original_url);
        assert_eq!(config.enrichment.concurrency, 10);
        assert_eq!(config.enrichment.max_attempts, 3);
        assert_eq!(config.loader.base_url, "https://old.reddit.com");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[enrichment]
concurrency = 1
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.enrichment.concurrency, 1);
        assert_eq!(config.enrichment.timeout(), Duration::from_secs(30));
        assert_eq!(config.links.host_domain, "reddit.com");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.enrichment.initial_backoff(), Duration::from_secs(1));
        assert_eq!(config.enrichment.max_backoff(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[links]\nshow_original_url = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.links.show_original_url);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[links\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
