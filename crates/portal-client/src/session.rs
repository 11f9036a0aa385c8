//! Login/logout flows tying the portal client to a credential store.

use std::sync::Arc;

use tracing::info;

use portal_auth::CredentialStore;
use portal_core::result::AppResult;
use portal_core::types::Credential;

use crate::client::PortalClient;

/// Signs a caller in and out, keeping the credential store in step.
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: PortalClient,
    store: Arc<CredentialStore>,
}

impl SessionClient {
    /// Creates a session client.
    pub fn new(client: PortalClient, store: Arc<CredentialStore>) -> Self {
        Self { client, store }
    }

    /// Logs in upstream, then stores the issued credential.
    ///
    /// Nothing is stored unless the upstream login succeeds and the
    /// response validates.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Credential> {
        let response = self.client.login(email, password).await?;
        self.store.login(response.token(), response.profile())?;
        Ok(self.store.current())
    }

    /// Clears the stored credential. Idempotent.
    pub fn sign_out(&self) {
        self.store.logout();
        info!("Signed out");
    }

    /// The underlying credential store.
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// The underlying portal client.
    pub fn client(&self) -> &PortalClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};

    use portal_auth::{MemoryCookieStorage, Platform};
    use portal_core::config::{ApiConfig, CookieConfig};
    use portal_core::types::UserProfile;

    use super::*;

    const TOKEN: &str = "a.eyJleHAiOjk5OTk5OTk5OTl9.b";

    async fn spawn_login(status: StatusCode) -> String {
        let app = Router::new().route(
            "/api/portal/login",
            post(move |Json(body): Json<Value>| async move {
                let email = body["email"].clone();
                (
                    status,
                    Json(json!({
                        "meta": {"code": status.as_u16(), "status": "x", "message": "x"},
                        "data": {
                            "user": {"email": email, "exp": 9999999999i64},
                            "access_token": {"token": TOKEN, "type": "Bearer", "expires_in": 60}
                        }
                    })),
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    fn session(base_url: String) -> SessionClient {
        let client = PortalClient::new(&ApiConfig {
            base_url,
            ..Default::default()
        })
        .expect("client");
        let store = CredentialStore::new(
            Platform::client(MemoryCookieStorage::new()),
            CookieConfig::default(),
        );
        SessionClient::new(client, Arc::new(store))
    }

    #[tokio::test]
    async fn test_sign_in_stores_credential() {
        let session = session(spawn_login(StatusCode::OK).await);
        let credential = session.sign_in("a@b.c", "pw").await.expect("sign in");

        assert_eq!(
            credential,
            Credential::authenticated(TOKEN, UserProfile::new("a@b.c", 9_999_999_999))
        );
        assert_eq!(session.store().persisted_token().as_deref(), Some(TOKEN));
        assert!(session.store().is_valid());
    }

    #[tokio::test]
    async fn test_failed_sign_in_stores_nothing() {
        let session = session(spawn_login(StatusCode::UNAUTHORIZED).await);
        assert!(session.sign_in("a@b.c", "pw").await.is_err());
        assert_eq!(session.store().current(), Credential::empty());
        assert!(session.store().persisted_token().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_twice() {
        let session = session(spawn_login(StatusCode::OK).await);
        session.sign_in("a@b.c", "pw").await.expect("sign in");

        session.sign_out();
        session.sign_out();
        assert_eq!(session.store().current(), Credential::empty());
        assert!(session.store().persisted_token().is_none());
    }
}
