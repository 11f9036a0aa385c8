//! Request guard: decides whether a request may reach protected routes.
//!
//! [`RequestGuard`] is the decision engine and knows nothing about HTTP
//! types. [`middleware::enforce`] adapts it to axum.

pub mod decision;
pub mod engine;
pub mod middleware;

pub use decision::{DenyReason, GuardOutcome};
pub use engine::RequestGuard;
