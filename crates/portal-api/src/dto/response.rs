//! Response DTOs.

use serde::{Deserialize, Serialize};

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Identity returned after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub email: String,
    /// Session expiry, epoch seconds.
    pub exp: i64,
}
