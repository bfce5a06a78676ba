//! Client configuration file support
//!
//! Handles parsing of `.marshal.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::file::DEFAULT_SESSION_FILENAME;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".marshal.toml";

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Environment variable for the backend base URL
pub const ENV_BACKEND_URL: &str = "MARSHAL_BACKEND_URL";

/// Environment variable for the API key
pub const ENV_API_KEY: &str = "MARSHAL_API_KEY";

/// Environment variable for the session file path
pub const ENV_SESSION_FILE: &str = "MARSHAL_SESSION_FILE";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Backend configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSection {
    /// Base URL of the Marshal backend
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// API key sent as `X-API-Key` on validation and repair calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_key: None,
        }
    }
}

/// Session persistence section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Where the CLI keeps its tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Main configuration structure
///
/// Represents the `.marshal.toml` configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl ClientConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.backend.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session.file = Some(path.into());
        self
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.marshal.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = var(ENV_BACKEND_URL) {
            self.backend.url = url;
        }

        if let Some(key) = var(ENV_API_KEY) {
            self.backend.api_key = Some(key);
        }

        if let Some(path) = var(ENV_SESSION_FILE) {
            self.session.file = Some(PathBuf::from(path));
        }
    }

    /// Backend base URL, never empty
    pub fn backend_url(&self) -> &str {
        if self.backend.url.trim().is_empty() {
            DEFAULT_BACKEND_URL
        } else {
            self.backend.url.trim()
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.backend
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Session file location
    ///
    /// Uses the configured path, otherwise `.marshal-session.json` in
    /// `home`, otherwise in the current directory.
    pub fn session_file(&self, home: Option<&Path>) -> PathBuf {
        match (&self.session.file, home) {
            (Some(path), _) => path.clone(),
            (None, Some(home)) => home.join(DEFAULT_SESSION_FILENAME),
            (None, None) => PathBuf::from(DEFAULT_SESSION_FILENAME),
        }
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Marshal SDK Configuration

[backend]
# Base URL of the Marshal backend
url = "http://localhost:8080"

# API key for validation and repair calls (dashboard calls use your login)
# api_key = "mk_..."

[session]
# Where the CLI stores its login (defaults to ~/.marshal-session.json)
# file = "/home/me/.marshal-session.json"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.session.file, None);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[backend]
url = "https://api.marshal.dev"
api_key = "mk_test"

[session]
file = "/tmp/session.json"
"#;
        let config = ClientConfig::parse(toml).unwrap();
        assert_eq!(config.backend_url(), "https://api.marshal.dev");
        assert_eq!(config.api_key(), Some("mk_test"));
        assert_eq!(
            config.session_file(None),
            PathBuf::from("/tmp/session.json")
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let config = ClientConfig::parse("[backend]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL);
        assert_eq!(config.api_key(), Some("k"));
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = ClientConfig::parse("[backend\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = ClientConfig::parse(sample_config()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::new()
            .with_backend_url("https://staging.marshal.dev")
            .with_api_key("mk_staging");

        config.save(dir.path()).unwrap();
        assert!(ClientConfig::exists(dir.path()));

        let loaded = ClientConfig::parse(
            &std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert!(!ClientConfig::exists(dir.path()));
        assert!(ClientConfig::load(dir.path()).is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BACKEND_URL, "https://env.marshal.dev"),
            (ENV_API_KEY, ""),
            (ENV_SESSION_FILE, "/var/tmp/s.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::new().with_api_key("from-file");
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.backend_url(), "https://env.marshal.dev");
        assert_eq!(config.api_key(), Some("from-file"));
        assert_eq!(
            config.session_file(Some(Path::new("/home/ada"))),
            PathBuf::from("/var/tmp/s.json")
        );
    }

    #[test]
    fn test_session_file_defaults() {
        let config = ClientConfig::new();
        assert_eq!(
            config.session_file(Some(Path::new("/home/ada"))),
            PathBuf::from("/home/ada/.marshal-session.json")
        );
        assert_eq!(
            config.session_file(None),
            PathBuf::from(DEFAULT_SESSION_FILENAME)
        );
    }
}
