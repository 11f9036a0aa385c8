//! # portal-core
//!
//! Core crate for the portal gate. Contains configuration schemas, the
//! credential and cookie types shared by every layer, the storage and
//! verification seams, and the unified error system.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
