//! Auth API and page-gate tests

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;

use ovd_common::auth::{AuthGate, TOKEN_KEY, USER_KEY};
use ovd_common::store::{KvStore, MemoryStore};
use ovd_gw::api::{self, AppContext};
use ovd_gw::proxy::ProxyClient;

fn gateway(store: Arc<dyn KvStore>) -> (Router, Arc<AuthGate>) {
    let gate = Arc::new(AuthGate::new(store));
    let ctx = AppContext {
        gate: Arc::clone(&gate),
        proxy: ProxyClient::new("http://localhost:8000").unwrap(),
        port: 5760,
    };
    (api::create_router(ctx), gate)
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Option<Value>, Option<String>) {
    use axum::body::Body;
    use http::{Method, Request};
    use tower::ServiceExt;

    let method = match method {
        "GET" => Method::GET,
        "POST" => Method::POST,
        _ => panic!("Unsupported method"),
    };

    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(json_body) => builder
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap().to_string());

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_body = serde_json::from_slice(&bytes).ok();

    (status, json_body, location)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = gateway(MemoryStore::shared());

    let (status, body, _) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["module"], "ovd-gw");
}

#[tokio::test]
async fn test_login_then_identity_then_logout() {
    let store = MemoryStore::shared();
    let (app, _) = gateway(Arc::clone(&store));

    // Logged out: identity is null
    let (status, body, _) = request(&app, "GET", "/api/auth/identity", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["user"].is_null());

    // Any credentials succeed
    let (status, body, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "demo@example.com", "password": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["user"]["email"], "demo@example.com");

    // Both keys were persisted
    assert!(store.get(TOKEN_KEY).await.unwrap().is_some());
    assert!(store.get(USER_KEY).await.unwrap().is_some());

    let (_, body, _) = request(&app, "GET", "/api/auth/identity", None).await;
    assert_eq!(body.unwrap()["user"]["email"], "demo@example.com");

    // Logout clears both keys and the identity
    let (status, _, _) = request(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body, _) = request(&app, "GET", "/api/auth/identity", None).await;
    assert!(body.unwrap()["user"].is_null());
    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(store.get(USER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_signup_uses_given_username() {
    let (app, _) = gateway(MemoryStore::shared());

    let (status, body, _) = request(
        &app,
        "POST",
        "/api/auth/signup",
        Some(json!({
            "username": "carol",
            "email": "carol@example.com",
            "password": "pw"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["user"]["username"], "carol");
}

#[tokio::test]
async fn test_detector_page_is_gated() {
    let (app, gate) = gateway(MemoryStore::shared());

    // Unauthenticated: redirect to the login entry point
    let (status, _, location) = request(&app, "GET", "/detector", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));

    // Authenticated: the page renders
    gate.login("demo@example.com", "pw").await.unwrap();
    let (status, _, location) = request(&app, "GET", "/detector", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
}

#[tokio::test]
async fn test_public_pages_render() {
    let (app, _) = gateway(MemoryStore::shared());

    for path in ["/", "/login", "/signup", "/about"] {
        let (status, _, _) = request(&app, "GET", path, None).await;
        assert_eq!(status, StatusCode::OK, "page {} should render", path);
    }
}

#[tokio::test]
async fn test_corrupt_store_record_restores_logged_out() {
    let store = MemoryStore::shared();
    store.set(TOKEN_KEY, "tok").await.unwrap();
    store.set(USER_KEY, "][ corrupt ][").await.unwrap();

    let (_, gate) = gateway(Arc::clone(&store));
    assert_eq!(gate.restore().await.unwrap(), None);

    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(store.get(USER_KEY).await.unwrap(), None);
}
