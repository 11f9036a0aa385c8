//! Integration tests for the request guard.

mod helpers;

use http::StatusCode;

use portal_core::config::TransportFailurePolicy;

use helpers::{EPOCH_TOKEN, FAR_FUTURE_TOKEN, TestApp};

#[tokio::test]
async fn test_missing_token_redirects_without_remote_call() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/products/42", None, None).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));
    assert!(response.set_cookies().is_empty());
    assert_eq!(app.upstream.verify_calls(), 0);
}

#[tokio::test]
async fn test_verified_token_passes_through() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/products/42", None, Some(FAR_FUTURE_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "42");
    assert!(response.set_cookies().is_empty());
    assert_eq!(app.upstream.verify_calls(), 1);
}

#[tokio::test]
async fn test_rejected_token_is_cleared_and_redirected() {
    let app = TestApp::new().await;
    app.upstream.respond_with(StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/products/42", None, Some(FAR_FUTURE_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));
    assert!(response.clears_cookie());
    assert_eq!(app.upstream.verify_calls(), 1);
}

#[tokio::test]
async fn test_expired_token_is_cleared_without_remote_call() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/products", None, Some(EPOCH_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert!(response.clears_cookie());
    assert_eq!(app.upstream.verify_calls(), 0);
}

#[tokio::test]
async fn test_malformed_token_is_cleared() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/products", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));
    assert!(response.clears_cookie());
    assert_eq!(app.upstream.verify_calls(), 0);
}

#[tokio::test]
async fn test_unprotected_paths_pass_without_token() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let lookalike = app.request("GET", "/productsale", None, None).await;
    assert_eq!(lookalike.status, StatusCode::NOT_FOUND);

    assert_eq!(app.upstream.verify_calls(), 0);
}

#[tokio::test]
async fn test_transport_failure_redirects_and_keeps_token() {
    let app = TestApp::unreachable(|_| {}).await;

    let response = app
        .request("GET", "/products/42", None, Some(FAR_FUTURE_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));
    assert!(!response.clears_cookie());
}

#[tokio::test]
async fn test_transport_failure_can_clear_token() {
    let app = TestApp::unreachable(|config| {
        config.guard.on_transport_error = TransportFailurePolicy::ClearAndRedirect;
    })
    .await;

    let response = app
        .request("GET", "/products/42", None, Some(FAR_FUTURE_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert!(response.clears_cookie());
}

#[tokio::test]
async fn test_transport_failure_can_report_unavailable() {
    let app = TestApp::unreachable(|config| {
        config.guard.on_transport_error = TransportFailurePolicy::Unavailable;
        config.guard.retry_after_seconds = 9;
    })
    .await;

    let response = app
        .request("GET", "/products/42", None, Some(FAR_FUTURE_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), Some("9"));
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
    assert!(!response.clears_cookie());
}

#[tokio::test]
async fn test_custom_redirect_target_and_prefixes() {
    let app = TestApp::with_config(|config| {
        config.guard.protected_prefixes = vec!["/products".to_string(), "/orders".to_string()];
        config.guard.redirect_to = "/login".to_string();
    })
    .await;

    let response = app.request("GET", "/orders/7", None, None).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/login"));
}
