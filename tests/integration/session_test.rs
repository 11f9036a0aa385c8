//! Integration tests for the session endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{FAR_FUTURE_TOKEN, PASSWORD, TestApp};

#[tokio::test]
async fn test_login_sets_secure_strict_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/session/login",
            Some(json!({"email": "a@b.c", "password": PASSWORD})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "a@b.c");
    assert_eq!(response.body["exp"], 9_999_999_999i64);

    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with(&format!("access_token={FAR_FUTURE_TOKEN}; Path=/; Expires=")));
    assert!(cookies[0].contains("2286"));
    assert!(cookies[0].ends_with("; Secure; SameSite=Strict"));
}

#[tokio::test]
async fn test_failed_login_sets_no_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/session/login",
            Some(json!({"email": "a@b.c", "password": "wrong"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Login failed");
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_blank_email_is_rejected_locally() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/session/login",
            Some(json!({"email": " ", "password": PASSWORD})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new().await;

    let first = app
        .request("POST", "/api/session/logout", None, Some(FAR_FUTURE_TOKEN))
        .await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert!(first.clears_cookie());

    let second = app.request("POST", "/api/session/logout", None, None).await;
    assert_eq!(second.status, StatusCode::NO_CONTENT);
    assert!(second.clears_cookie());
}

#[tokio::test]
async fn test_login_then_browse_products() {
    let app = TestApp::new().await;

    let login = app
        .request(
            "POST",
            "/api/session/login",
            Some(json!({"email": "a@b.c", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let cookie = login.set_cookies().remove(0);
    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("access_token="))
        .expect("token in cookie")
        .to_string();

    let list = app.request("GET", "/products", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body[0]["id"], "42");

    let item = app.request("GET", "/products/42", None, Some(&token)).await;
    assert_eq!(item.status, StatusCode::OK);
    assert_eq!(item.body["name"], "Widget");
}
