//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lastfm-client\config.toml
//! - macOS: ~/Library/Application Support/lastfm-client/config.toml
//! - Linux: ~/.config/lastfm-client/config.toml
//!
//! The config file is human-readable and editable. Command-line flags and
//! the `LASTFM_API_KEY` environment variable take precedence over it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::lastfm::DEFAULT_BASE_URL;
use crate::lastfm::transport::USER_AGENT;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Web service settings
    pub api: ApiConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Last.fm API key (get one at https://www.last.fm/api/account/create)
    pub api_key: Option<String>,
}

/// Web service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint requests are sent to
    pub base_url: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Pick the API key: explicit value first, then the config file
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.credentials
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lastfm-client"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from an explicit path, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to an explicit path
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[api]"));
        assert!(toml.contains("ws.audioscrobbler.com"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.api_key = Some("test-key-123".to_string());
        config.api.timeout_secs = 5;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.credentials.api_key, Some("test-key-123".to_string()));
        assert_eq!(parsed.api.timeout_secs, 5);
        assert_eq!(parsed.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[api]
base_url = "http://localhost:9000/2.0/"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.api.base_url, "http://localhost:9000/2.0/");

        // Other fields use defaults
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.user_agent, USER_AGENT);
        assert!(config.credentials.api_key.is_none());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.credentials.api_key = Some("file-key".to_string());
        save_to(&config, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = load_from(&path);
        assert_eq!(loaded.credentials.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_missing_or_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_from(&dir.path().join("absent.toml"));
        assert_eq!(missing.api, ApiConfig::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "this is [not toml").unwrap();
        let loaded = load_from(&broken);
        assert_eq!(loaded.api, ApiConfig::default());
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_api_key(None), None);

        config.credentials.api_key = Some("from-file".to_string());
        assert_eq!(config.resolve_api_key(None).as_deref(), Some("from-file"));
        assert_eq!(config.resolve_api_key(Some("from-flag")).as_deref(), Some("from-flag"));
        assert_eq!(config.resolve_api_key(Some("  ")).as_deref(), Some("from-file"));
    }
}
