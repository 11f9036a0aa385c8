//! Upstream portal API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Location and behaviour of the upstream identity / product API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the upstream API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the login endpoint.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Path of the bearer-protected endpoint used to verify tokens.
    #[serde(default = "default_verify_path")]
    pub verify_path: String,
    /// Per-request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            verify_path: default_verify_path(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Joins the base URL with an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Returns the configured timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

fn default_base_url() -> String {
    "https://api-v2.sefloo.com".to_string()
}

fn default_login_path() -> String {
    "/api/portal/login".to_string()
}

fn default_verify_path() -> String {
    "/api/portal/products".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("portal-gate/{}", env!("CARGO_PKG_VERSION"))
}
