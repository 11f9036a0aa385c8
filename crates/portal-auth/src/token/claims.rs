//! Claims read from a token payload.

use chrono::Utc;
use serde::{Deserialize, Deserializer};

/// The subset of payload claims the gate cares about.
///
/// Unknown claims are ignored. Signatures are never checked here; the
/// issuing service remains the authority on authenticity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiration timestamp (seconds since epoch). Absent means non-expiring.
    #[serde(default, deserialize_with = "deserialize_epoch")]
    pub exp: Option<i64>,
    /// Account email, when the issuer embeds it.
    #[serde(default)]
    pub email: Option<String>,
    /// Subject.
    #[serde(default)]
    pub sub: Option<String>,
}

impl TokenClaims {
    /// Whether the token has expired at `now` (seconds since epoch).
    ///
    /// A token is usable only while `exp` is strictly in the future.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    /// Whether the token has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Remaining lifetime in seconds (0 if expired, `None` if non-expiring).
    pub fn remaining_ttl_seconds(&self) -> Option<u64> {
        self.exp.map(|exp| {
            let remaining = exp - Utc::now().timestamp();
            if remaining > 0 { remaining as u64 } else { 0 }
        })
    }
}

/// Accepts integer or fractional epoch seconds; fractions are truncated.
fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Number> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(number) => {
            if let Some(exp) = number.as_i64() {
                Ok(Some(exp))
            } else if let Some(exp) = number.as_f64() {
                if exp.is_finite() {
                    Ok(Some(exp.trunc() as i64))
                } else {
                    Err(serde::de::Error::custom("exp is not finite"))
                }
            } else {
                Err(serde::de::Error::custom("exp is out of range"))
            }
        }
    }
}
