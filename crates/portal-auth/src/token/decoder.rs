//! Unverified decoding of compact bearer tokens.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

use super::claims::TokenClaims;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Base64url, padding optional (what issuers normally emit).
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard base64, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Why a token could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not three dot-separated segments.
    #[error("token is not a three-segment compact token")]
    Malformed,
    /// The payload segment is not valid base64.
    #[error("token payload is not valid base64")]
    Encoding,
    /// The payload is not a JSON object with well-typed claims.
    #[error("token payload is not a valid claims object: {0}")]
    Payload(String),
}

/// Decodes the payload claims of a `header.payload.signature` token.
///
/// The signature is not verified.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    if payload.is_empty() {
        return Err(TokenError::Malformed);
    }

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|_| TokenError::Encoding)?;

    serde_json::from_slice::<TokenClaims>(&bytes).map_err(|e| TokenError::Payload(e.to_string()))
}
