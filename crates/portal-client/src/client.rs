//! HTTP client for the upstream portal API.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use portal_core::config::ApiConfig;
use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::traits::{TokenVerifier, Verification};
use portal_core::types::credential::fingerprint;

use crate::dto::{LoginRequest, LoginResponse};

/// Talks to the portal API: login, token verification, and product reads.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl PortalClient {
    /// Builds a client from API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build HTTP client: {e}"),
                e,
            )
        })?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// The API configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Exchanges email and password for a bearer token.
    ///
    /// Any non-2xx answer is reported as a generic login failure; the
    /// upstream status and body are not carried in the error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let url = self.config.url(&self.config.login_path);
        debug!(url = %url, email = %email, "Sending login request");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| transport_error("login", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(email = %email, status = status.as_u16(), "Login rejected upstream");
            return Err(AppError::authentication("Login failed"));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Malformed login response: {e}"),
                e,
            )
        })?;
        body.validate()?;

        info!(email = %body.data.user.email, "Login succeeded");
        Ok(body)
    }

    /// Asks the bearer-protected endpoint whether `token` is still accepted.
    ///
    /// Issues exactly one request; transport failures are returned as
    /// `ExternalService` errors.
    pub async fn verify_token(&self, token: &str) -> AppResult<Verification> {
        let url = self.config.url(&self.config.verify_path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("verification", e))?;

        let status = response.status();
        if status.is_success() {
            debug!(token = fingerprint(token), "Token accepted upstream");
            Ok(Verification::Accepted)
        } else {
            warn!(
                token = fingerprint(token),
                status = status.as_u16(),
                "Token rejected upstream"
            );
            Ok(Verification::Rejected {
                status: status.as_u16(),
            })
        }
    }

    /// Fetches the product list on behalf of the token holder.
    pub async fn products(&self, token: &str) -> AppResult<serde_json::Value> {
        let url = self.config.url(&self.config.verify_path);
        self.get_json(&url, token).await
    }

    /// Fetches a single product on behalf of the token holder.
    pub async fn product(&self, token: &str, id: &str) -> AppResult<serde_json::Value> {
        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AppError::validation(format!("Invalid product id '{id}'")));
        }
        let url = format!(
            "{}/{}",
            self.config.url(&self.config.verify_path).trim_end_matches('/'),
            id
        );
        self.get_json(&url, token).await
    }

    async fn get_json(&self, url: &str, token: &str) -> AppResult<serde_json::Value> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("product", e))?;

        match response.status() {
            status if status.is_success() => response.json().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Malformed product response: {e}"),
                    e,
                )
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AppError::authentication("Upstream rejected the token"))
            }
            StatusCode::NOT_FOUND => Err(AppError::not_found("Product not found")),
            status => Err(AppError::external_service(format!(
                "Upstream returned HTTP {}",
                status.as_u16()
            ))),
        }
    }
}

#[async_trait]
impl TokenVerifier for PortalClient {
    async fn verify(&self, token: &str) -> AppResult<Verification> {
        self.verify_token(token).await
    }
}

fn transport_error(call: &str, err: reqwest::Error) -> AppError {
    warn!(call = %call, error = %err, "Portal API unreachable");
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Portal API {call} request failed: {err}"),
        err,
    )
}
