//! # portal-client
//!
//! HTTP client for the upstream portal API.
//!
//! - `client`: `PortalClient`: login, token verification, product passthrough
//! - `dto`: typed request/response payloads validated at the boundary
//! - `session`: `SessionClient`: login/logout flows that drive a `CredentialStore`

pub mod client;
pub mod dto;
pub mod session;

pub use client::PortalClient;
pub use dto::{LoginResponse, PortalUser};
pub use session::SessionClient;
