//! In-process cookie slot backed by a concurrent map.

use chrono::Utc;
use dashmap::DashMap;

use portal_core::result::AppResult;
use portal_core::traits::CookieStorage;
use portal_core::types::SessionCookie;

/// In-memory cookie storage. Expired cookies are dropped on read.
#[derive(Debug, Default)]
pub struct MemoryCookieStorage {
    cookies: DashMap<String, SessionCookie>,
}

impl MemoryCookieStorage {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full stored cookie (attributes included), if unexpired.
    pub fn cookie(&self, name: &str) -> Option<SessionCookie> {
        let now = Utc::now();
        self.cookies
            .remove_if(name, |_, cookie| cookie.is_expired_at(now));
        self.cookies
            .get(name)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.clone())
    }

    /// Number of stored cookies, expired ones included.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStorage for MemoryCookieStorage {
    fn get(&self, name: &str) -> Option<String> {
        self.cookie(name).map(|cookie| cookie.value)
    }

    fn set(&self, cookie: &SessionCookie) -> AppResult<()> {
        self.cookies.insert(cookie.name.clone(), cookie.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> AppResult<()> {
        self.cookies.remove(name);
        Ok(())
    }
}
