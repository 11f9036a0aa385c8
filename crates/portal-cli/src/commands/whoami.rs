//! Show the claims carried by the stored token.

use std::process::ExitCode;

use serde::Serialize;
use tabled::Tabled;

use portal_auth::decode_claims;
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_core::types::credential::fingerprint;

use crate::output::{self, OutputFormat};

/// Claims display row
#[derive(Debug, Serialize, Tabled)]
struct ClaimsRow {
    /// Token fingerprint
    token: String,
    /// Email claim
    email: String,
    /// Subject claim
    subject: String,
    /// Expiry (RFC 3339)
    expires: String,
    /// Whether the token is past its expiry
    expired: bool,
}

/// Execute the whoami command. The token is decoded, not verified.
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<ExitCode, AppError> {
    let Some(token) = super::open_store(config).persisted_token() else {
        output::print_warning("Not logged in");
        return Ok(ExitCode::FAILURE);
    };

    let claims = decode_claims(&token)
        .map_err(|e| AppError::validation(format!("Stored token is unreadable: {}", e)))?;

    output::print_row(
        &ClaimsRow {
            token: format!("{}…", fingerprint(&token)),
            email: claims.email.clone().unwrap_or_else(|| "-".to_string()),
            subject: claims.sub.clone().unwrap_or_else(|| "-".to_string()),
            expires: output::format_expiry(claims.exp),
            expired: claims.is_expired(),
        },
        format,
    );
    Ok(ExitCode::SUCCESS)
}
