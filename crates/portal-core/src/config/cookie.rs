//! Session cookie configuration.

use serde::{Deserialize, Serialize};

use crate::types::cookie::SameSite;

/// Attributes applied to every write of the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie name holding the bearer token.
    #[serde(default = "default_name")]
    pub name: String,
    /// Cookie path.
    #[serde(default = "default_path")]
    pub path: String,
    /// Whether the `Secure` attribute is set. Only disable for local HTTP development.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// `SameSite` policy.
    #[serde(default)]
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            path: default_path(),
            secure: default_secure(),
            same_site: SameSite::default(),
        }
    }
}

fn default_name() -> String {
    "access_token".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_secure() -> bool {
    true
}
