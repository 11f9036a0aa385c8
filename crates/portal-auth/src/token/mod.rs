//! Bearer token claim decoding.

pub mod claims;
pub mod decoder;

pub use claims::TokenClaims;
pub use decoder::{TokenError, decode_claims};
