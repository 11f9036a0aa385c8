//! The guard decision engine.

use std::sync::Arc;

use tracing::{debug, warn};

use portal_auth::CredentialStore;
use portal_core::config::{GuardConfig, TransportFailurePolicy};
use portal_core::traits::{TokenVerifier, Verification};
use portal_core::types::credential::fingerprint;

use super::decision::{DenyReason, GuardOutcome};

/// Decides, per request path, whether the stored credential grants access.
#[derive(Debug, Clone)]
pub struct RequestGuard {
    config: GuardConfig,
    verifier: Arc<dyn TokenVerifier>,
}

impl RequestGuard {
    /// Creates a guard. `verifier` is only consulted when remote
    /// verification is enabled.
    pub fn new(config: GuardConfig, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { config, verifier }
    }

    /// Guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Whether `path` falls under a protected prefix.
    ///
    /// Matching is per path segment: `/products` protects `/products` and
    /// `/products/42` but not `/productsale`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.config
            .protected_prefixes
            .iter()
            .any(|prefix| segment_prefix_match(path, prefix))
    }

    /// Runs the decision procedure for one request.
    ///
    /// Issues at most one verification call and never retries.
    pub async fn evaluate(&self, path: &str, store: &CredentialStore) -> GuardOutcome {
        if !self.is_protected(path) {
            return GuardOutcome::PassThrough;
        }

        let Some(token) = store.persisted_token() else {
            debug!(path = %path, "No credential for protected path");
            return self.redirect(DenyReason::MissingCredential);
        };

        if self.config.check_expiry && !store.is_valid() {
            return self.redirect(DenyReason::InvalidCredential);
        }

        if !self.config.remote_verification {
            debug!(path = %path, token = fingerprint(&token), "Credential accepted locally");
            return GuardOutcome::PassThrough;
        }

        match self.verifier.verify(&token).await {
            Ok(Verification::Accepted) => {
                debug!(path = %path, token = fingerprint(&token), "Credential verified");
                GuardOutcome::PassThrough
            }
            Ok(Verification::Rejected { status }) => {
                store.logout();
                self.redirect(DenyReason::Rejected { status })
            }
            Err(e) => {
                warn!(
                    path = %path,
                    policy = %self.config.on_transport_error,
                    error = %e,
                    "Credential verification failed"
                );
                match self.config.on_transport_error {
                    TransportFailurePolicy::Redirect => {
                        self.redirect(DenyReason::VerificationFailed)
                    }
                    TransportFailurePolicy::ClearAndRedirect => {
                        store.logout();
                        self.redirect(DenyReason::VerificationFailed)
                    }
                    TransportFailurePolicy::Unavailable => GuardOutcome::Unavailable {
                        retry_after_seconds: self.config.retry_after_seconds,
                    },
                }
            }
        }
    }

    fn redirect(&self, reason: DenyReason) -> GuardOutcome {
        GuardOutcome::Redirect {
            location: self.config.redirect_to.clone(),
            reason,
        }
    }
}

fn segment_prefix_match(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
