//! Proxy endpoint contract tests
//!
//! A stub inference service bound to 127.0.0.1:0 plays the downstream
//! part; the gateway router is driven with oneshot requests.

use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use ovd_common::auth::AuthGate;
use ovd_common::store::MemoryStore;
use ovd_gw::api::{self, AppContext};
use ovd_gw::proxy::ProxyClient;

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn gateway_router(inference_url: &str) -> Router {
    let ctx = AppContext {
        gate: Arc::new(AuthGate::new(MemoryStore::shared())),
        proxy: ProxyClient::new(inference_url).unwrap(),
        port: 5760,
    };
    api::create_router(ctx)
}

async fn post_detect(app: &Router, body: Value) -> (StatusCode, Value) {
    use axum::body::Body;
    use http::Request;
    use tower::ServiceExt;

    let request = Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_downstream_success_passes_through() {
    let stub = Router::new().route("/detect", post(|| async { Json(json!({"x": 1})) }));
    let base_url = spawn_stub(stub).await;
    let app = gateway_router(&base_url);

    let (status, body) = post_detect(&app, json!({"image": "payload"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "data": {"x": 1}}));
}

#[tokio::test]
async fn test_downstream_error_collapses_to_fixed_body() {
    let stub = Router::new().route(
        "/detect",
        post(|| async {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "some downstream shape", "code": 42})),
            )
        }),
    );
    let base_url = spawn_stub(stub).await;
    let app = gateway_router(&base_url);

    let (status, body) = post_detect(&app, json!({"image": "payload"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Error processing image"})
    );
}

#[tokio::test]
async fn test_unreachable_downstream_collapses_the_same_way() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = gateway_router(&format!("http://{}", addr));
    let (status, body) = post_detect(&app, json!({"image": "payload"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Error processing image"})
    );
}

#[tokio::test]
async fn test_non_json_downstream_body_collapses_the_same_way() {
    let stub = Router::new().route("/detect", post(|| async { "<html>not json</html>" }));
    let base_url = spawn_stub(stub).await;
    let app = gateway_router(&base_url);

    let (status, body) = post_detect(&app, json!({"image": "payload"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_opaque_payload_shapes_are_forwarded_verbatim() {
    // The stub echoes what it received so the test can see the envelope.
    let stub = Router::new().route(
        "/detect",
        post(|Json(body): Json<Value>| async move { Json(json!({"echo": body})) }),
    );
    let base_url = spawn_stub(stub).await;
    let app = gateway_router(&base_url);

    let payload = json!({"nested": {"bytes": [1, 2, 3]}});
    let (status, body) = post_detect(&app, json!({ "image": payload })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["echo"]["image"], payload);
}
