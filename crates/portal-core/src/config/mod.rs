//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod api;
pub mod app;
pub mod client;
pub mod cookie;
pub mod guard;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::client::ClientConfig;
pub use self::cookie::CookieConfig;
pub use self::guard::{GuardConfig, TransportFailurePolicy};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `PORTAL__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream portal API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub cookie: CookieConfig,
    /// Request guard settings.
    #[serde(default)]
    pub guard: GuardConfig,
    /// Command-line client settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables prefixed with `PORTAL_` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from an explicit file path, still honouring
    /// `PORTAL_` environment overrides.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");

        assert_eq!(config.cookie.name, "access_token");
        assert_eq!(config.guard.protected_prefixes, vec!["/products".to_string()]);
        assert_eq!(config.guard.redirect_to, "/");
        assert_eq!(config.api.login_path, "/api/portal/login");
        assert_eq!(config.api.verify_path, "/api/portal/products");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_overrides_from_toml() {
        let toml = r#"
            [guard]
            protected_prefixes = ["/products", "/orders"]
            remote_verification = false
            on_transport_error = "unavailable"

            [api]
            base_url = "http://127.0.0.1:9000"
            timeout_seconds = 0
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");

        assert_eq!(config.guard.protected_prefixes.len(), 2);
        assert!(!config.guard.remote_verification);
        assert_eq!(
            config.guard.on_transport_error,
            TransportFailurePolicy::Unavailable
        );
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert!(config.api.timeout().is_none());
    }
}
