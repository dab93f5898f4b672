//! Remote label source against a stub inference service
//!
//! Binds a throwaway HTTP server on 127.0.0.1:0 that plays the inference
//! service's part, then drives the remote strategy against it.

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};

use ovd_ds::capability::Frame;
use ovd_ds::detect::{InferenceClient, LabelSource, RemoteSource};

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_frame() -> Frame {
    Frame {
        seq: 0,
        width: 640,
        height: 480,
        data: vec![9, 9, 9],
    }
}

#[tokio::test]
async fn test_remote_source_maps_detected_objects() {
    let app = Router::new().route(
        "/detect",
        post(|Json(body): Json<Value>| async move {
            // The stub checks the envelope the client promises to send.
            assert!(body["image"].as_str().unwrap().starts_with("data:"));
            Json(json!({
                "detected_objects": ["person", "laptop"],
                "message": "Detection completed successfully"
            }))
        }),
    );
    let base_url = spawn_stub(app).await;

    let source = RemoteSource::new(InferenceClient::new(base_url.as_str()).unwrap());
    let labels = source.labels(&test_frame()).await.unwrap();
    assert_eq!(labels, vec!["person", "laptop"]);
}

#[tokio::test]
async fn test_remote_source_collapses_downstream_error() {
    let app = Router::new().route(
        "/detect",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "model exploded", "trace": [1, 2, 3]})),
            )
        }),
    );
    let base_url = spawn_stub(app).await;

    let source = RemoteSource::new(InferenceClient::new(base_url.as_str()).unwrap());
    let result = source.labels(&test_frame()).await;

    // Whatever the downstream said, the caller sees the one generic kind.
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "inference request failed");
}

#[tokio::test]
async fn test_remote_source_collapses_malformed_body() {
    let app = Router::new().route("/detect", post(|| async { "plain text, not json" }));
    let base_url = spawn_stub(app).await;

    let source = RemoteSource::new(InferenceClient::new(base_url.as_str()).unwrap());
    let err = source.labels(&test_frame()).await.unwrap_err();
    assert_eq!(err.to_string(), "inference request failed");
}

#[tokio::test]
async fn test_remote_source_collapses_connect_failure() {
    // Bind then immediately drop the listener: the port refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = RemoteSource::new(InferenceClient::new(format!("http://{}", addr)).unwrap());
    let err = source.labels(&test_frame()).await.unwrap_err();
    assert_eq!(err.to_string(), "inference request failed");
}
