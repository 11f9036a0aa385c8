//! Request guard configuration.

use serde::{Deserialize, Serialize};

/// Controls which paths are protected and how credentials are checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Route prefixes that require a valid credential.
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
    /// Location sent with every redirect issued by the guard.
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
    /// Decode the token locally and reject malformed or expired ones.
    #[serde(default = "default_true")]
    pub check_expiry: bool,
    /// Confirm the token with the upstream verification endpoint.
    #[serde(default = "default_true")]
    pub remote_verification: bool,
    /// What to do when the verification call itself fails.
    #[serde(default)]
    pub on_transport_error: TransportFailurePolicy,
    /// `Retry-After` value used with [`TransportFailurePolicy::Unavailable`].
    #[serde(default = "default_retry_after")]
    pub retry_after_seconds: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: default_protected_prefixes(),
            redirect_to: default_redirect_to(),
            check_expiry: true,
            remote_verification: true,
            on_transport_error: TransportFailurePolicy::default(),
            retry_after_seconds: default_retry_after(),
        }
    }
}

/// Outcome applied when the verification endpoint cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailurePolicy {
    /// Redirect, keeping the stored token.
    #[default]
    Redirect,
    /// Clear the stored token, then redirect.
    ClearAndRedirect,
    /// Respond `503 Service Unavailable` with `Retry-After`, keeping the token.
    Unavailable,
}

impl std::fmt::Display for TransportFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redirect => write!(f, "redirect"),
            Self::ClearAndRedirect => write!(f, "clear_and_redirect"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

fn default_protected_prefixes() -> Vec<String> {
    vec!["/products".to_string()]
}

fn default_redirect_to() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_retry_after() -> u64 {
    5
}
