//! Command-line client configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the `portal` command-line client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// File holding the client's persistent cookie slot.
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file(),
        }
    }
}

fn default_cookie_file() -> PathBuf {
    PathBuf::from("data/cookies.json")
}
