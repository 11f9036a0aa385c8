//! Request-scoped cookie slot backed by the inbound `Cookie` header.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::warn;

use portal_core::config::CookieConfig;
use portal_core::result::AppResult;
use portal_core::traits::CookieStorage;
use portal_core::types::SessionCookie;

/// Cookie storage for a single HTTP exchange.
///
/// Reads come from the request's cookies; writes and removals update that
/// view and queue `Set-Cookie` headers for the response.
#[derive(Debug)]
pub struct RequestCookies {
    cookie: CookieConfig,
    jar: Mutex<Jar>,
}

#[derive(Debug, Default)]
struct Jar {
    values: HashMap<String, String>,
    set_cookies: Vec<String>,
}

impl RequestCookies {
    /// Snapshots the cookies carried by a request.
    pub fn from_jar(jar: &CookieJar, cookie: CookieConfig) -> Self {
        let values = jar
            .iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        Self {
            cookie,
            jar: Mutex::new(Jar {
                values,
                set_cookies: Vec::new(),
            }),
        }
    }

    /// Snapshots the cookies in a request header map.
    pub fn from_headers(headers: &HeaderMap, cookie: CookieConfig) -> Self {
        Self::from_jar(&CookieJar::from_headers(headers), cookie)
    }

    /// Drains the queued `Set-Cookie` header values.
    pub fn take_set_cookies(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().set_cookies)
    }

    /// Appends the queued `Set-Cookie` headers to a response.
    pub fn apply(&self, response: &mut Response) {
        for value in self.take_set_cookies() {
            match HeaderValue::from_str(&value) {
                Ok(header) => {
                    response.headers_mut().append(SET_COOKIE, header);
                }
                Err(e) => warn!(error = %e, "Dropping unrepresentable Set-Cookie header"),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Jar> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieStorage for RequestCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.lock().values.get(name).cloned()
    }

    fn set(&self, cookie: &SessionCookie) -> AppResult<()> {
        let mut jar = self.lock();
        if cookie.is_expired_at(Utc::now()) {
            jar.values.remove(&cookie.name);
        } else {
            jar.values.insert(cookie.name.clone(), cookie.value.clone());
        }
        jar.set_cookies.push(cookie.to_header_value());
        Ok(())
    }

    fn remove(&self, name: &str) -> AppResult<()> {
        let mut jar = self.lock();
        if jar.values.remove(name).is_some() || name == self.cookie.name {
            let config = CookieConfig {
                name: name.to_string(),
                ..self.cookie.clone()
            };
            jar.set_cookies
                .push(SessionCookie::removal_header_value(&config));
        }
        Ok(())
    }
}
