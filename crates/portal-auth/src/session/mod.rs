//! Session credential lifecycle (initialize, login, logout, validity).

pub mod platform;
pub mod store;

pub use platform::Platform;
pub use store::CredentialStore;
