//! Backend API configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API, e.g. `https://host/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Candidate user-list paths under `base_url`, probed in order.
    #[serde(default = "default_user_paths")]
    pub user_paths: Vec<String>,

    /// Pin the user-list endpoint to one absolute URL. Disables probing.
    #[serde(default)]
    pub users_endpoint: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_paths: default_user_paths(),
            users_endpoint: None,
        }
    }
}

impl ApiConfig {
    /// Ordered list of user-list URLs the console may bind to.
    pub fn candidate_urls(&self) -> Vec<String> {
        if let Some(endpoint) = &self.users_endpoint {
            return vec![endpoint.trim_end_matches('/').to_string()];
        }

        let base = self.base_url.trim_end_matches('/');
        self.user_paths
            .iter()
            .map(|path| {
                let path = path.trim_end_matches('/');
                if path.starts_with('/') {
                    format!("{base}{path}")
                } else {
                    format!("{base}/{path}")
                }
            })
            .collect()
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "https://shadowgatebackend-production.up.railway.app/api".to_string()
}

fn default_user_paths() -> Vec<String> {
    vec!["/admin/users".to_string(), "/users".to_string()]
}
