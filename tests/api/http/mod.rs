//! HTTP API Handler Tests Infrastructure
//!
//! Key components:
//! - `TestApp` - production `AppState` over `MemoryStore` and `FakeIdentityProvider`
//! - Uses production `build_router()` so the real handlers in `src/api/*.rs` run
//! - Helper functions for making HTTP requests (get_json, post_json, etc.)

pub mod auth_http_test;
pub mod order_http_test;
pub mod product_http_test;
pub mod seller_http_test;

use crate::api::{test_config, FakeIdentityProvider};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use farmcart_core::server::{build_router, AppState};
use farmcart_core::store::{fields, DocumentStore, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test App
// ============================================================================

/// Router plus direct handles on its store and identity provider
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub identity: Arc<FakeIdentityProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let identity = Arc::new(FakeIdentityProvider::new());
        let state = AppState::new(test_config(), store.clone(), identity.clone(), None);

        Self {
            router: build_router(state),
            store,
            identity,
        }
    }

    /// Write an active `users/{uid}` document with `role` and return a bearer token for it
    pub async fn login_as(&self, uid: &str, role: &str) -> String {
        self.login_with_status(uid, role, "active").await
    }

    pub async fn login_with_status(&self, uid: &str, role: &str, status: &str) -> String {
        let email = format!("{}@farm.test", uid);
        self.store
            .put(
                "users",
                uid,
                fields([
                    ("id", json!(uid)),
                    ("email", json!(email)),
                    ("full_name", json!(uid)),
                    ("role", json!(role)),
                    ("status", json!(status)),
                ]),
                false,
            )
            .await
            .unwrap();

        let token = format!("token-{}", uid);
        self.identity.issue_token(&token, uid, Some(&email)).await;
        token
    }

    /// Seller account with a profile in the given approval state
    pub async fn seller(&self, uid: &str, approval_status: &str) -> String {
        let token = self.login_as(uid, "seller").await;
        self.seed(
            "seller_profiles",
            uid,
            json!({
                "id": uid,
                "user_id": uid,
                "farm_name": format!("{} farm", uid),
                "approval_status": approval_status,
                "is_verified": approval_status == "approved",
            }),
        )
        .await;
        token
    }

    /// Overwrite a document with the given JSON object
    pub async fn seed(&self, collection: &str, id: &str, doc: Value) {
        let map: Map<String, Value> = match doc {
            Value::Object(map) => map,
            other => panic!("seed expects an object, got {}", other),
        };
        self.store.put(collection, id, map, false).await.unwrap();
    }

    /// Raw stored document
    pub async fn doc(&self, collection: &str, id: &str) -> Option<Value> {
        self.store
            .get(collection, id)
            .await
            .unwrap()
            .map(|d| d.into_value())
    }

    pub async fn docs(&self, collection: &str) -> Vec<Value> {
        self.store
            .scan_all(collection)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.into_value())
            .collect()
    }
}

// ============================================================================
// HTTP Test Helpers
// ============================================================================

/// Send a request and parse the JSON response body, if any
pub async fn send_json<R: DeserializeOwned>(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Option<R>) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if body_bytes.is_empty() {
        return (status, None);
    }

    match serde_json::from_slice(&body_bytes) {
        Ok(data) => (status, Some(data)),
        Err(_) => (status, None),
    }
}

/// Make a GET request and parse JSON response
pub async fn get_json<R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: Option<&str>,
) -> (StatusCode, Option<R>) {
    send_json(app, Method::GET, path, token, None).await
}

/// Make a POST request with JSON body and parse JSON response
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &T,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_value(body).unwrap();
    send_json(app, Method::POST, path, token, Some(&body)).await
}

/// Make a PUT request with JSON body and parse JSON response
pub async fn put_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &T,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_value(body).unwrap();
    send_json(app, Method::PUT, path, token, Some(&body)).await
}

/// Make a PATCH request with JSON body and parse JSON response
pub async fn patch_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &T,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_value(body).unwrap();
    send_json(app, Method::PATCH, path, token, Some(&body)).await
}

/// Make a DELETE request and parse JSON response
pub async fn delete_json<R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: Option<&str>,
) -> (StatusCode, Option<R>) {
    send_json(app, Method::DELETE, path, token, None).await
}
