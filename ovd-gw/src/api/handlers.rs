//! HTTP request handlers for the gateway

use crate::api::AppContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Opaque payload; forwarded without inspection
    image: Value,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    username: String,
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "ovd-gw".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        port: ctx.port,
    })
}

// ============================================================================
// Detection Proxy
// ============================================================================

/// POST /api/detect - Forward an image payload to the inference service
///
/// Downstream success comes back as `{"status":"success","data":...}`
/// with the body passed through untouched; any failure, whatever its
/// shape, becomes the one fixed 500 body.
pub async fn detect(
    State(ctx): State<AppContext>,
    Json(req): Json<DetectRequest>,
) -> (StatusCode, Json<Value>) {
    match ctx.proxy.detect(req.image).await {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": data,
            })),
        ),
        Err(e) => {
            error!("Detect forward failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "fail",
                    "message": "Error processing image",
                })),
            )
        }
    }
}

// ============================================================================
// Mock Auth API
// ============================================================================

/// POST /api/auth/login - Stub login (any credentials succeed)
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<StatusResponse>)> {
    match ctx.gate.login(&req.email, &req.password).await {
        Ok(identity) => {
            info!("Login for {}", identity.email);
            Ok(Json(json!({
                "status": "ok",
                "user": identity,
            })))
        }
        Err(e) => {
            error!("Login failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}

/// POST /api/auth/signup - Stub signup
pub async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<Value>, (StatusCode, Json<StatusResponse>)> {
    match ctx
        .gate
        .signup(&req.username, &req.email, &req.password)
        .await
    {
        Ok(identity) => {
            info!("Signup for {}", identity.username);
            Ok(Json(json!({
                "status": "ok",
                "user": identity,
            })))
        }
        Err(e) => {
            error!("Signup failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}

/// POST /api/auth/logout - Clear the persisted identity
pub async fn logout(
    State(ctx): State<AppContext>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    match ctx.gate.logout().await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ok".to_string(),
        })),
        Err(e) => {
            error!("Logout failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}

/// GET /api/auth/identity - Current identity (null when logged out)
pub async fn identity(State(ctx): State<AppContext>) -> Json<Value> {
    Json(json!({
        "user": ctx.gate.current_identity().await,
    }))
}

// ============================================================================
// SSE
// ============================================================================

/// GET /events - Connection-status stream
pub async fn event_stream(
    State(_ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    ovd_common::sse::heartbeat_stream("ovd-gw")
}
