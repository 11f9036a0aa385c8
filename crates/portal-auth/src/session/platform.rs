//! Runtime capability injected into the credential store.

use std::sync::Arc;

use portal_core::traits::CookieStorage;

/// Where a credential store runs.
///
/// A client runtime owns a persistent cookie slot; a detached runtime
/// (e.g. pre-rendering with no caller) has none, so every persistent read
/// or write is skipped.
#[derive(Debug, Clone)]
pub enum Platform {
    /// A client runtime with its persistent cookie slot.
    Client(Arc<dyn CookieStorage>),
    /// No client runtime; persistence is unavailable.
    Detached,
}

impl Platform {
    /// Convenience constructor for a client runtime.
    pub fn client(storage: impl CookieStorage) -> Self {
        Self::Client(Arc::new(storage))
    }

    /// Returns the cookie slot when running in a client runtime.
    pub fn storage(&self) -> Option<&Arc<dyn CookieStorage>> {
        match self {
            Self::Client(storage) => Some(storage),
            Self::Detached => None,
        }
    }
}
