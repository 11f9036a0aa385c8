//! Session handlers: login and logout.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use portal_auth::{CredentialStore, Platform};
use portal_client::SessionClient;
use portal_core::error::AppError;

use crate::cookies::RequestCookies;
use crate::dto::{LoginBody, SessionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/session/login
///
/// On success the token is written as the session cookie; on failure no
/// cookie is set.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> ApiResult<Response> {
    body.validate()?;

    let (cookies, store) = request_store(&state, &jar);
    let session = SessionClient::new(state.client.as_ref().clone(), store);
    let credential = session.sign_in(&body.email, &body.password).await?;
    let profile = credential
        .profile
        .ok_or_else(|| AppError::internal("Login produced no profile"))?;

    let mut response = Json(SessionResponse {
        email: profile.email,
        exp: profile.expires_at,
    })
    .into_response();
    cookies.apply(&mut response);
    Ok(response)
}

/// POST /api/session/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (cookies, store) = request_store(&state, &jar);
    store.logout();

    let mut response = StatusCode::NO_CONTENT.into_response();
    cookies.apply(&mut response);
    response
}

fn request_store(state: &AppState, jar: &CookieJar) -> (Arc<RequestCookies>, Arc<CredentialStore>) {
    let cookies = Arc::new(RequestCookies::from_jar(jar, state.config.cookie.clone()));
    let store = CredentialStore::open(
        Platform::Client(cookies.clone()),
        state.config.cookie.clone(),
    );
    (cookies, Arc::new(store))
}
