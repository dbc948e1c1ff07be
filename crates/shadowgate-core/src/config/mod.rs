//! Configuration types for the Shadowgate admin console.
//!
//! Configuration is loaded from a YAML file (`shadowgate.yaml` by default).
//! Every field has a default, so an empty file and a missing file behave
//! the same way.

pub mod api;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use api::{ApiConfig, HttpConfig};

/// Complete console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Client storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// URL (or root-relative path) the console is served from.
    /// Redirect targets are derived from it.
    #[serde(default = "default_console_url")]
    pub console_url: String,

    /// Also remove the remembered display name (`sg_user`) on logout.
    #[serde(default)]
    pub forget_display_name: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
            console_url: default_console_url(),
            forget_display_name: false,
        }
    }
}

/// Where the client-side storage file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_console_url() -> String {
    "/Shadowgate_Bank/admin/".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".shadowgate").join("storage.json")
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.candidate_urls().is_empty() {
            return Err(ConfigError::Config(
                "api.user_paths must list at least one path when api.users_endpoint is not set"
                    .to_string(),
            ));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.console_url, "/Shadowgate_Bank/admin/");
        assert_eq!(
            crate::Redirect::Login.url(&config.console_url),
            "/Shadowgate_Bank/login/"
        );
        assert!(!config.forget_display_name);
        assert_eq!(
            config.storage.path,
            PathBuf::from(".shadowgate").join("storage.json")
        );
        assert_eq!(config.http.timeout_secs, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ConsoleConfig::from_yaml("   \n").unwrap();
        assert_eq!(config.api.user_paths, vec!["/admin/users", "/users"]);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
api:
  base_url: http://localhost:8000/api/
  users_endpoint: http://localhost:8000/api/admin/users
console_url: https://bank.example/Shadowgate_Bank/admin/
forget_display_name: true
storage:
  path: /tmp/sg.json
http:
  timeout_secs: 10
"#;
        let config = ConsoleConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(
            config.api.candidate_urls(),
            vec!["http://localhost:8000/api/admin/users".to_string()]
        );
        assert!(config.forget_display_name);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/sg.json"));
        assert_eq!(config.http.timeout_secs, Some(10));
    }

    #[test]
    fn test_rejects_empty_candidate_list() {
        let yaml = "api:\n  user_paths: []\n";
        let err = ConsoleConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ConsoleConfig::from_yaml("http:\n  timeout_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load_or_default(dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config.console_url, "/Shadowgate_Bank/admin/");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shadowgate.yaml");
        fs::write(&path, "console_url: /bank/admin/\n").unwrap();

        let config = ConsoleConfig::load_or_default(&path).unwrap();
        assert_eq!(config.console_url, "/bank/admin/");
    }
}
