//! Persistent cookie representation and `Set-Cookie` rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CookieConfig;

/// HTTP-date format used by the `Expires` attribute.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    /// Sent only with same-site requests.
    #[default]
    Strict,
    /// Sent with same-site requests and top-level navigations.
    Lax,
    /// Sent with all requests (requires `Secure`).
    None,
}

impl std::fmt::Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "Strict"),
            Self::Lax => write!(f, "Lax"),
            Self::None => write!(f, "None"),
        }
    }
}

/// A single cookie as written to a persistent slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Cookie path.
    pub path: String,
    /// Absolute expiry; `None` makes a session cookie.
    pub expires: Option<DateTime<Utc>>,
    /// `Secure` attribute.
    pub secure: bool,
    /// `SameSite` attribute.
    pub same_site: SameSite,
}

impl SessionCookie {
    /// Builds a cookie carrying the configured attributes.
    pub fn new(
        config: &CookieConfig,
        value: impl Into<String>,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: config.name.clone(),
            value: value.into(),
            path: config.path.clone(),
            expires,
            secure: config.secure,
            same_site: config.same_site,
        }
    }

    /// Whether the cookie has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// Renders the cookie as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut header = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(expires) = self.expires {
            header.push_str(&format!("; Expires={}", expires.format(HTTP_DATE_FORMAT)));
        }
        self.push_flags(&mut header);
        header
    }

    /// Renders a `Set-Cookie` header value that deletes the named cookie.
    pub fn removal_header_value(config: &CookieConfig) -> String {
        let mut header = format!(
            "{}=; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            config.name, config.path
        );
        let removal = Self::new(config, "", None);
        removal.push_flags(&mut header);
        header
    }

    fn push_flags(&self, header: &mut String) {
        if self.secure {
            header.push_str("; Secure");
        }
        header.push_str(&format!("; SameSite={}", self.same_site));
    }
}
