//! Route definitions for the portal gate HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::guard;
use crate::handlers;
use crate::state::AppState;

/// Build the router with all routes and the request guard.
///
/// The guard wraps every route (including unmatched paths) and decides for
/// itself which paths are protected.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .nest("/api/session", session_routes())
        .merge(product_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::middleware::enforce,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Session endpoints: login, logout
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::session::login))
        .route("/logout", post(handlers::session::logout))
}

/// Guarded product proxy
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::products::list_products))
        .route("/products/{id}", get(handlers::products::get_product))
}
