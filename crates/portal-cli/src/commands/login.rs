//! Log in against the portal API.

use std::process::ExitCode;

use clap::Args;
use dialoguer::Password;

use portal_client::{PortalClient, SessionClient};
use portal_core::config::AppConfig;
use portal_core::error::AppError;

use crate::output;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, config: &AppConfig) -> Result<ExitCode, AppError> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Failed to read password: {}", e)))?,
    };

    let client = PortalClient::new(&config.api)?;
    let session = SessionClient::new(client, super::open_store(config));
    let credential = session.sign_in(&args.email, &password).await?;

    output::print_success("Logged in");
    if let Some(profile) = &credential.profile {
        output::print_kv("Email", &profile.email);
        output::print_kv("Expires", &output::format_expiry(Some(profile.expires_at)));
    }
    output::print_kv(
        "Cookie file",
        &config.client.cookie_file.display().to_string(),
    );
    Ok(ExitCode::SUCCESS)
}
