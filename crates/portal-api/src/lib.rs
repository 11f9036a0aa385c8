//! # portal-api
//!
//! HTTP layer for the portal gate built on Axum.
//!
//! Provides the request guard (decision engine and middleware), the
//! request-scoped cookie slot, session and product endpoints, middleware
//! (CORS, logging), and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use guard::{DenyReason, GuardOutcome, RequestGuard};
pub use state::AppState;
