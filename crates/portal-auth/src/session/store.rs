//! The credential store: sole owner of the session credential.
//!
//! All reads and writes of the persisted token go through this type. The
//! in-memory copy is published on a `watch` channel, so every mutation is
//! visible to subscribers before the mutating call returns.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use portal_core::config::CookieConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::types::credential::fingerprint;
use portal_core::types::{Credential, SessionCookie, UserProfile};

use super::platform::Platform;
use crate::token::decode_claims;

/// Session context for one client runtime instance.
#[derive(Debug)]
pub struct CredentialStore {
    /// Runtime capability (persistent cookie slot or none).
    platform: Platform,
    /// Attributes applied to every cookie write.
    cookie: CookieConfig,
    /// Current credential, observable by subscribers.
    state: watch::Sender<Credential>,
}

impl CredentialStore {
    /// Creates a store with an empty in-memory credential.
    pub fn new(platform: Platform, cookie: CookieConfig) -> Self {
        let (state, _) = watch::channel(Credential::empty());
        Self {
            platform,
            cookie,
            state,
        }
    }

    /// Creates a store and immediately loads any persisted token.
    pub fn open(platform: Platform, cookie: CookieConfig) -> Self {
        let store = Self::new(platform, cookie);
        store.initialize();
        store
    }

    /// Reads an existing persisted token into memory, leaving the profile unknown.
    ///
    /// No-op outside a client runtime or when nothing is persisted.
    pub fn initialize(&self) {
        let Some(storage) = self.platform.storage() else {
            return;
        };
        if let Some(token) = storage.get(&self.cookie.name) {
            debug!(token = fingerprint(&token), "Loaded persisted credential");
            self.state.send_replace(Credential::token_only(token));
        }
    }

    /// Stores a freshly issued credential.
    ///
    /// The cookie expires at `profile.expires_at` (epoch seconds, written as
    /// an absolute date) and always carries the configured `Secure` and
    /// `SameSite` attributes. Outside a client runtime only the in-memory
    /// state is updated. If the persistent write fails nothing changes.
    pub fn login(&self, token: impl Into<String>, profile: UserProfile) -> AppResult<()> {
        let token = token.into();
        validate_cookie_value(&token)?;

        if let Some(storage) = self.platform.storage() {
            let expires = profile.expires_at_utc();
            if expires.is_none() {
                warn!(
                    exp = profile.expires_at,
                    "Profile expiry is out of range; writing a session cookie"
                );
            }
            storage.set(&SessionCookie::new(&self.cookie, token.clone(), expires))?;
        }

        info!(
            email = %profile.email,
            token = fingerprint(&token),
            "Session credential stored"
        );
        self.state
            .send_replace(Credential::authenticated(token, profile));
        Ok(())
    }

    /// Deletes the persisted token and clears the in-memory credential.
    ///
    /// Idempotent. Storage failures are logged, never returned.
    pub fn logout(&self) {
        self.remove_persisted();
        self.state.send_replace(Credential::empty());
        debug!("Session credential cleared");
    }

    /// Whether the persisted credential is usable right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    /// Whether the persisted credential is usable at `now` (epoch seconds).
    ///
    /// Fails closed: no client runtime, no persisted token, an undecodable
    /// token, or an expiry at or before `now` all yield `false`. The last two
    /// also delete the persisted token. When memory holds the profile issued
    /// with the persisted token, its expiry decides and the token is never
    /// decoded. Otherwise the token's `exp` claim decides; a token without
    /// `exp` is accepted.
    pub fn is_valid_at(&self, now: i64) -> bool {
        let Some(storage) = self.platform.storage() else {
            return false;
        };
        let Some(token) = storage.get(&self.cookie.name) else {
            return false;
        };

        if let Some(expires_at) = self.profile_expiry(&token) {
            if expires_at > now {
                return true;
            }
            warn!(
                token = fingerprint(&token),
                exp = expires_at,
                "Session profile has expired"
            );
            self.discard(&token);
            return false;
        }

        match decode_claims(&token) {
            Ok(claims) if !claims.is_expired_at(now) => true,
            Ok(claims) => {
                warn!(
                    token = fingerprint(&token),
                    exp = claims.exp,
                    "Persisted credential has expired"
                );
                self.discard(&token);
                false
            }
            Err(e) => {
                warn!(
                    token = fingerprint(&token),
                    error = %e,
                    "Persisted credential cannot be decoded"
                );
                self.discard(&token);
                false
            }
        }
    }

    /// Returns the token currently held in persistent storage.
    pub fn persisted_token(&self) -> Option<String> {
        self.platform
            .storage()
            .and_then(|storage| storage.get(&self.cookie.name))
    }

    /// Returns the in-memory token.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    /// Returns a snapshot of the in-memory credential.
    pub fn current(&self) -> Credential {
        self.state.borrow().clone()
    }

    /// Subscribes to credential changes.
    pub fn subscribe(&self) -> watch::Receiver<Credential> {
        self.state.subscribe()
    }

    /// Expiry of the in-memory profile, if it was issued with `token`.
    fn profile_expiry(&self, token: &str) -> Option<i64> {
        let current = self.state.borrow();
        match (&current.token, &current.profile) {
            (Some(held), Some(profile)) if held == token => Some(profile.expires_at),
            _ => None,
        }
    }

    /// Removes an invalid persisted token and, if memory holds the same
    /// token, clears and publishes the empty credential.
    fn discard(&self, token: &str) {
        self.remove_persisted();
        self.state.send_if_modified(|current| {
            if current.token.as_deref() == Some(token) {
                *current = Credential::empty();
                true
            } else {
                false
            }
        });
    }

    fn remove_persisted(&self) {
        if let Some(storage) = self.platform.storage() {
            if let Err(e) = storage.remove(&self.cookie.name) {
                warn!(error = %e, "Failed to delete persisted credential");
            }
        }
    }
}

/// Rejects tokens that cannot be carried verbatim in a cookie value.
fn validate_cookie_value(token: &str) -> AppResult<()> {
    if token.is_empty() {
        return Err(AppError::validation("Token must not be empty"));
    }
    let forbidden = |c: char| c.is_ascii_control() || c.is_whitespace() || "\",;\\%".contains(c);
    if !token.is_ascii() || token.chars().any(forbidden) {
        return Err(AppError::validation(
            "Token contains characters not allowed in a cookie value",
        ));
    }
    Ok(())
}
