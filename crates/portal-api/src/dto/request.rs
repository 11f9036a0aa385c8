//! Request DTOs.

use serde::{Deserialize, Serialize};

use portal_core::error::AppError;
use portal_core::result::AppResult;

/// POST /api/session/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginBody {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginBody {
    /// Rejects blank fields before anything is sent upstream.
    pub fn validate(&self) -> AppResult<()> {
        if self.email.trim().is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        Ok(())
    }
}
