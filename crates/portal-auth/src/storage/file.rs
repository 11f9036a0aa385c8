//! Cookie slot persisted as a JSON file, for command-line clients.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::CookieStorage;
use portal_core::types::SessionCookie;

type CookieMap = BTreeMap<String, SessionCookie>;

/// Stores cookies in a JSON document keyed by cookie name.
///
/// A missing file is an empty jar. An unreadable or corrupt file reads as
/// empty (fail closed) and is replaced on the next write.
#[derive(Debug)]
pub struct FileCookieStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileCookieStorage {
    /// Creates a storage rooted at `path`. The file is created lazily.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CookieMap {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CookieMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read cookie file");
                return CookieMap::new();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Cookie file is corrupt; ignoring it");
            CookieMap::new()
        })
    }

    fn save(&self, cookies: &CookieMap) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(cookies)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut CookieMap)) -> AppResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::internal("Cookie file lock poisoned"))?;
        let mut cookies = self.load();
        let now = Utc::now();
        cookies.retain(|_, cookie| !cookie.is_expired_at(now));
        apply(&mut cookies);
        self.save(&cookies)
    }
}

impl CookieStorage for FileCookieStorage {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = self.lock.lock().ok()?;
        self.load()
            .remove(name)
            .filter(|cookie| !cookie.is_expired_at(Utc::now()))
            .map(|cookie| cookie.value)
    }

    fn set(&self, cookie: &SessionCookie) -> AppResult<()> {
        self.update(|cookies| {
            cookies.insert(cookie.name.clone(), cookie.clone());
        })
    }

    fn remove(&self, name: &str) -> AppResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|cookies| {
            cookies.remove(name);
        })
    }
}
