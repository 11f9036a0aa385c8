//! CLI command definitions and dispatch.

pub mod login;
pub mod logout;
pub mod serve;
pub mod status;
pub mod whoami;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use portal_auth::{CredentialStore, FileCookieStorage, Platform};
use portal_core::config::AppConfig;
use portal_core::error::AppError;

use crate::output::OutputFormat;

/// Portal gate: session-validity client and guard server
#[derive(Debug, Parser)]
#[command(name = "portal", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to config/default + PORTAL_ENV overlay)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session cookie
    Login(login::LoginArgs),
    /// Delete the stored session cookie
    Logout,
    /// Check whether the stored session is valid
    Status,
    /// Show the claims of the stored token
    Whoami,
    /// Start the guard server
    Serve(serve::ServeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<ExitCode, AppError> {
        let config = load_config(self.config.as_deref())?;
        match &self.command {
            Commands::Login(args) => login::execute(args, &config).await,
            Commands::Logout => logout::execute(&config),
            Commands::Status => status::execute(&config, self.format),
            Commands::Whoami => whoami::execute(&config, self.format),
            Commands::Serve(args) => serve::execute(args, config).await,
        }
    }
}

/// Helper: load configuration from an explicit file or the environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::load_file(path),
        None => {
            let env = std::env::var("PORTAL_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: the credential store backed by the CLI's cookie file
pub fn open_store(config: &AppConfig) -> Arc<CredentialStore> {
    let storage = FileCookieStorage::new(&config.client.cookie_file);
    Arc::new(CredentialStore::open(
        Platform::client(storage),
        config.cookie.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use portal_core::types::UserProfile;

    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.client.cookie_file = dir.path().join("cookies.json");
        config
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(&dir);

        open_store(&config)
            .login(
                "a.eyJleHAiOjk5OTk5OTk5OTl9.b",
                UserProfile::new("a@b.c", 9_999_999_999),
            )
            .expect("login");

        let reopened = open_store(&config);
        assert!(reopened.is_valid());
        assert_eq!(
            reopened.current().token.as_deref(),
            Some("a.eyJleHAiOjk5OTk5OTk5OTl9.b")
        );
    }

    #[test]
    fn test_cli_parses_login() {
        let cli = Cli::try_parse_from(["portal", "login", "--email", "a@b.c"]).expect("parse");
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.email, "a@b.c");
                assert!(args.password.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
