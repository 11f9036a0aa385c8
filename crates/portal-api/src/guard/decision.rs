//! Guard outcomes.

use std::fmt;

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No persisted token.
    MissingCredential,
    /// The token could not be decoded or has expired.
    InvalidCredential,
    /// The verification endpoint refused the token.
    Rejected {
        /// Upstream HTTP status.
        status: u16,
    },
    /// The verification endpoint could not be reached.
    VerificationFailed,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing_credential"),
            Self::InvalidCredential => write!(f, "invalid_credential"),
            Self::Rejected { status } => write!(f, "rejected ({status})"),
            Self::VerificationFailed => write!(f, "verification_failed"),
        }
    }
}

/// What the guard decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Continue to normal request handling.
    PassThrough,
    /// Send the caller to `location`.
    Redirect {
        /// Redirect target.
        location: String,
        /// Why access was denied.
        reason: DenyReason,
    },
    /// Verification is temporarily impossible; the caller may retry.
    Unavailable {
        /// Suggested delay before retrying.
        retry_after_seconds: u64,
    },
}
