//! Report whether the stored session is usable.

use std::process::ExitCode;

use serde::Serialize;
use tabled::Tabled;

use portal_core::config::AppConfig;
use portal_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Status display row
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    /// `valid` or `invalid`
    status: &'static str,
    /// Cookie file consulted
    cookie_file: String,
}

/// Execute the status command.
///
/// An expired or undecodable token is deleted as a side effect. Exits
/// with status 1 when the session is not valid.
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<ExitCode, AppError> {
    let valid = super::open_store(config).is_valid();
    output::print_row(
        &StatusRow {
            status: if valid { "valid" } else { "invalid" },
            cookie_file: config.client.cookie_file.display().to_string(),
        },
        format,
    );
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
