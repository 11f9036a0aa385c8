//! # portal-auth
//!
//! Client-side session handling for the portal gate.
//!
//! ## Modules
//!
//! - `token`: unverified decoding of bearer-token claims (`exp`, `email`, `sub`)
//! - `session`: the credential store and the platform it runs on
//! - `storage`: persistent cookie slots (in-memory and JSON file)

pub mod session;
pub mod storage;
pub mod token;

pub use session::{CredentialStore, Platform};
pub use storage::{FileCookieStorage, MemoryCookieStorage};
pub use token::{TokenClaims, TokenError, decode_claims};
