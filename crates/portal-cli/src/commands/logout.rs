//! Delete the stored session.

use std::process::ExitCode;

use portal_core::config::AppConfig;
use portal_core::error::AppError;

use crate::output;

/// Execute the logout command. Succeeds whether or not a session exists.
pub fn execute(config: &AppConfig) -> Result<ExitCode, AppError> {
    super::open_store(config).logout();
    output::print_success("Logged out");
    Ok(ExitCode::SUCCESS)
}
