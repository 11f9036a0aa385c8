//! The session credential: bearer token plus optional user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal identity attached to a credential after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account email.
    pub email: String,
    /// Session expiry in seconds since the Unix epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl UserProfile {
    /// Creates a profile.
    pub fn new(email: impl Into<String>, expires_at: i64) -> Self {
        Self {
            email: email.into(),
            expires_at,
        }
    }

    /// Returns the expiry as a UTC date, if it is representable.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// The current session artifact.
///
/// `profile` may be unknown even when `token` is present (e.g. after
/// `initialize` reads only the cookie). When it is
/// present, `profile.expires_at` is the authoritative expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token.
    pub token: Option<String>,
    /// Identity associated with the token.
    pub profile: Option<UserProfile>,
}

impl Credential {
    /// The cleared credential.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A credential holding a token whose profile is not yet known.
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            profile: None,
        }
    }

    /// A credential produced by a successful login.
    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            profile: Some(profile),
        }
    }

    /// Whether a token is present.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Short, log-safe prefix of a token.
pub fn fingerprint(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(8)
        .map(|(idx, _)| idx)
        .unwrap_or(token.len());
    &token[..end]
}
