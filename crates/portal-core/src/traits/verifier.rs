//! Remote token verification seam.

use async_trait::async_trait;

use crate::result::AppResult;

/// Result of asking the backing service whether a token is still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The service answered with a success status.
    Accepted,
    /// The service answered with a non-success status.
    Rejected {
        /// HTTP status returned upstream.
        status: u16,
    },
}

/// Checks a bearer token against a backing service.
///
/// `Err` is reserved for transport failures (the service could not be
/// asked); a reachable service that refuses the token yields
/// `Ok(Verification::Rejected { .. })`.
#[async_trait]
pub trait TokenVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verifies a single token. Implementations must not retry.
    async fn verify(&self, token: &str) -> AppResult<Verification>;
}
