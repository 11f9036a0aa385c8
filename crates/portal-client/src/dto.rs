//! Portal API payloads.

use serde::{Deserialize, Serialize};
use tracing::warn;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::types::UserProfile;

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Envelope metadata returned with every portal response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Application status code.
    #[serde(default)]
    pub code: i64,
    /// Status label.
    #[serde(default)]
    pub status: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalUser {
    /// Account email.
    pub email: String,
    /// Session expiry (seconds since epoch).
    pub exp: i64,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The opaque bearer token.
    pub token: String,
    /// Token scheme, normally `"Bearer"`.
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds, when provided.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// `data` section of a login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    /// Authenticated user.
    pub user: PortalUser,
    /// Issued token.
    pub access_token: AccessToken,
}

/// Full login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Envelope metadata.
    #[serde(default)]
    pub meta: ResponseMeta,
    /// Payload.
    pub data: LoginData,
}

impl LoginResponse {
    /// Checks the fields the credential store depends on.
    pub fn validate(&self) -> AppResult<()> {
        if self.data.access_token.token.trim().is_empty() {
            return Err(AppError::external_service(
                "Login response did not contain an access token",
            ));
        }
        if self.data.user.email.trim().is_empty() {
            return Err(AppError::external_service(
                "Login response did not contain a user email",
            ));
        }
        if !self
            .data
            .access_token
            .token_type
            .eq_ignore_ascii_case("bearer")
        {
            warn!(
                token_type = %self.data.access_token.token_type,
                "Login returned a non-bearer token type; using it as a bearer token"
            );
        }
        Ok(())
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.data.access_token.token
    }

    /// Profile to store alongside the token.
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.data.user.email.clone(), self.data.user.exp)
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "meta": {"code": 200, "status": "success", "message": "ok"},
            "data": {
                "user": {"email": "a@b.c", "exp": 9999999999i64},
                "access_token": {"token": "h.p.s", "type": "bearer", "expires_in": 3600}
            }
        })
    }

    #[test]
    fn test_parse_and_validate() {
        let response: LoginResponse = serde_json::from_value(sample()).expect("parse");
        response.validate().expect("valid");
        assert_eq!(response.token(), "h.p.s");
        assert_eq!(response.profile(), UserProfile::new("a@b.c", 9_999_999_999));
        assert_eq!(response.meta.code, 200);
    }

    #[test]
    fn test_missing_user_is_a_parse_error() {
        let mut value = sample();
        value["data"].as_object_mut().expect("object").remove("user");
        assert!(serde_json::from_value::<LoginResponse>(value).is_err());
    }

    #[test]
    fn test_empty_token_fails_validation() {
        let mut value = sample();
        value["data"]["access_token"]["token"] = serde_json::json!("  ");
        let response: LoginResponse = serde_json::from_value(value).expect("parse");
        assert!(response.validate().is_err());
    }

    #[test]
    fn test_meta_is_optional() {
        let mut value = sample();
        value.as_object_mut().expect("object").remove("meta");
        let response: LoginResponse = serde_json::from_value(value).expect("parse");
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_unknown_token_type_still_accepted() {
        let mut value = sample();
        value["data"]["access_token"]["type"] = serde_json::json!("mac");
        let response: LoginResponse = serde_json::from_value(value).expect("parse");
        response.validate().expect("valid");
        assert_eq!(response.token(), "h.p.s");
    }
}
