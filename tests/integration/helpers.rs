//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use portal_api::AppState;
use portal_core::config::AppConfig;

/// Token whose payload is `{"exp":9999999999}`.
pub const FAR_FUTURE_TOKEN: &str = "a.eyJleHAiOjk5OTk5OTk5OTl9.b";
/// Token whose payload is `{"exp":1}`.
pub const EPOCH_TOKEN: &str = "a.eyJleHAiOjF9.b";
/// Password the stub upstream accepts.
pub const PASSWORD: &str = "secret";

/// Observable state of the stub upstream API.
#[derive(Debug)]
pub struct Upstream {
    /// Status returned by the verification endpoint.
    verify_status: AtomicU16,
    /// Number of verification calls received.
    verify_calls: AtomicUsize,
}

impl Upstream {
    /// Makes the verification endpoint answer with `status`.
    pub fn respond_with(&self, status: StatusCode) {
        self.verify_status.store(status.as_u16(), Ordering::SeqCst);
    }

    /// Number of verification calls received so far.
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

async fn upstream_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"meta": {"code": 401, "status": "error", "message": "bad credentials"}})),
        );
    }
    let email = body["email"].clone();
    (
        StatusCode::OK,
        Json(json!({
            "meta": {"code": 200, "status": "success", "message": "ok"},
            "data": {
                "user": {"email": email, "exp": 9999999999i64},
                "access_token": {"token": FAR_FUTURE_TOKEN, "type": "Bearer", "expires_in": 3600}
            }
        })),
    )
}

async fn upstream_products(State(upstream): State<Arc<Upstream>>) -> (StatusCode, Json<Value>) {
    upstream.verify_calls.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(upstream.verify_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!([{"id": "42", "name": "Widget"}])))
}

async fn upstream_product(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (StatusCode::OK, Json(json!({"id": id, "name": "Widget"})))
}

/// Serves the stub upstream on an ephemeral port and returns its base URL.
async fn spawn_upstream(upstream: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/api/portal/login", post(upstream_login))
        .route("/api/portal/products", get(upstream_products))
        .route("/api/portal/products/{id}", get(upstream_product))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub upstream failed");
    });
    format!("http://{}", addr)
}

/// Test application context
pub struct TestApp {
    /// The Axum application under test
    pub router: Router,
    /// The stub upstream API
    pub upstream: Arc<Upstream>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Creates an application backed by a healthy stub upstream.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Creates an application, letting the test adjust configuration first.
    pub async fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let upstream = Arc::new(Upstream {
            verify_status: AtomicU16::new(200),
            verify_calls: AtomicUsize::new(0),
        });

        let mut config = AppConfig::default();
        config.api.base_url = spawn_upstream(upstream.clone()).await;
        config.api.timeout_seconds = 5;
        configure(&mut config);

        let state = AppState::new(config.clone()).expect("Failed to build state");
        let router = portal_api::build_app(state);

        Self {
            router,
            upstream,
            config,
        }
    }

    /// Creates an application whose upstream cannot be reached.
    pub async fn unreachable(configure: impl FnOnce(&mut AppConfig)) -> Self {
        Self::with_config(|config| {
            // Nothing listens on the discard port.
            config.api.base_url = "http://127.0.0.1:9".to_string();
            configure(config);
        })
        .await
    }

    /// Sends a request, optionally carrying the session cookie.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header(COOKIE, format!("{}={}", self.config.cookie.name, token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All `Set-Cookie` values.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// Whether the response deletes the session cookie.
    pub fn clears_cookie(&self) -> bool {
        self.set_cookies()
            .iter()
            .any(|c| c.starts_with("access_token=;") && c.contains("Max-Age=0"))
    }
}
