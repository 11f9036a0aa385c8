//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portal_client::PortalClient;
use portal_core::config::AppConfig;
use portal_core::result::AppResult;
use portal_core::traits::TokenVerifier;

use crate::guard::RequestGuard;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Upstream portal API client
    pub client: Arc<PortalClient>,
    /// Request guard for protected paths
    pub guard: Arc<RequestGuard>,
}

impl AppState {
    /// Builds state whose guard verifies tokens through the portal client.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = Arc::new(PortalClient::new(&config.api)?);
        let verifier: Arc<dyn TokenVerifier> = client.clone();
        Ok(Self::with_verifier(config, client, verifier))
    }

    /// Builds state with an explicit verifier.
    pub fn with_verifier(
        config: AppConfig,
        client: Arc<PortalClient>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let guard = Arc::new(RequestGuard::new(config.guard.clone(), verifier));
        Self {
            config: Arc::new(config),
            client,
            guard,
        }
    }
}
