//! Seams defined in `portal-core` and implemented by other crates.

pub mod cookie;
pub mod verifier;

pub use cookie::CookieStorage;
pub use verifier::{TokenVerifier, Verification};
