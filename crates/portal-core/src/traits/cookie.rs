//! Persistent cookie slot abstraction.

use crate::result::AppResult;
use crate::types::cookie::SessionCookie;

/// A synchronous, persistent cookie slot scoped to one client runtime.
///
/// Implementations must not return cookies whose expiry has passed, and
/// `remove` must succeed when the cookie is already absent.
pub trait CookieStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the value of the named cookie, if present and unexpired.
    fn get(&self, name: &str) -> Option<String>;

    /// Writes a cookie, replacing any cookie with the same name.
    fn set(&self, cookie: &SessionCookie) -> AppResult<()>;

    /// Deletes the named cookie.
    fn remove(&self, name: &str) -> AppResult<()>;
}
