//! Request and response bodies for the HTTP API.

pub mod request;
pub mod response;

pub use request::LoginBody;
pub use response::{HealthResponse, SessionResponse};
