//! Axum adapter for the request guard.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::{LOCATION, RETRY_AFTER};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use tracing::info;

use portal_auth::{CredentialStore, Platform};

use super::decision::GuardOutcome;
use crate::cookies::RequestCookies;
use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// Applies the guard to every request on protected paths.
///
/// The credential store is built per request over the request's cookies,
/// so any deletion it performs is sent back as `Set-Cookie`.
pub async fn enforce(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !state.guard.is_protected(&path) {
        return next.run(request).await;
    }

    let cookies = Arc::new(RequestCookies::from_jar(&jar, state.config.cookie.clone()));
    let store = CredentialStore::open(
        Platform::Client(cookies.clone()),
        state.config.cookie.clone(),
    );

    let mut response = match state.guard.evaluate(&path, &store).await {
        GuardOutcome::PassThrough => next.run(request).await,
        GuardOutcome::Redirect { location, reason } => {
            info!(path = %path, reason = %reason, location = %location, "Request redirected");
            redirect(&location)
        }
        GuardOutcome::Unavailable {
            retry_after_seconds,
        } => {
            info!(path = %path, retry_after_seconds, "Credential verification unavailable");
            unavailable(retry_after_seconds)
        }
    };

    cookies.apply(&mut response);
    response
}

/// `302 Found` to `location`.
fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

fn unavailable(retry_after_seconds: u64) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(RETRY_AFTER, retry_after_seconds.to_string())],
        Json(ApiErrorResponse {
            error: "SERVICE_UNAVAILABLE".to_string(),
            message: "Session verification is temporarily unavailable".to_string(),
        }),
    )
        .into_response()
}
