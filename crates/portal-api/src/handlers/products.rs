//! Product proxy handlers. Mounted behind the request guard.

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::CookieJar;
use serde_json::Value;

use portal_core::error::AppError;
use portal_core::result::AppResult;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /products
pub async fn list_products(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Json<Value>> {
    let token = session_token(&state, &jar)?;
    Ok(Json(state.client.products(&token).await?))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> ApiResult<Json<Value>> {
    let token = session_token(&state, &jar)?;
    Ok(Json(state.client.product(&token, &id).await?))
}

fn session_token(state: &AppState, jar: &CookieJar) -> AppResult<String> {
    jar.get(&state.config.cookie.name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::authentication("Missing session cookie"))
}
