//! Shared domain types.

pub mod cookie;
pub mod credential;

pub use cookie::{SameSite, SessionCookie};
pub use credential::{Credential, UserProfile};
