//! HTTP request handlers
//!
//! Implements the session control endpoints.

use crate::api::AppState;
use crate::error::Error;
use crate::state::SessionState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
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

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStateResponse {
    state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    labels: Vec<String>,
    count: usize,
}

#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    overlay: Option<crate::detect::overlay::OverlayFrame>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "ovd-ds".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        port: state.port,
    })
}

/// POST /session/start - Begin a detection session
pub async fn start_session(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    info!("Session start requested");

    match state.engine.start().await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ok".to_string(),
        })),
        Err(e @ Error::Camera(_)) => {
            error!("Session start refused: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
        Err(e @ Error::InvalidState(_)) => Err((
            StatusCode::CONFLICT,
            Json(StatusResponse {
                status: format!("error: {}", e),
            }),
        )),
        Err(e) => {
            error!("Session start failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}

/// POST /session/stop - End the session (no-op when idle)
pub async fn stop_session(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    info!("Session stop requested");

    match state.engine.stop().await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ok".to_string(),
        })),
        Err(e) => {
            error!("Session stop failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}

/// POST /session/tick - Run one detection tick immediately
pub async fn trigger_tick(State(state): State<AppState>) -> Json<StatusResponse> {
    state.engine.tick_once().await;
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

/// GET /session/state - Current session lifecycle state
pub async fn get_session_state(State(state): State<AppState>) -> Json<SessionStateResponse> {
    Json(SessionStateResponse {
        state: state.shared.session_state().await,
    })
}

/// GET /session/labels - Most recent tick's label set
pub async fn get_labels(State(state): State<AppState>) -> Json<LabelsResponse> {
    let labels = state.shared.labels().await;
    let count = labels.len();
    Json(LabelsResponse { labels, count })
}

/// GET /session/overlay - Most recent tick's overlay render
pub async fn get_overlay(State(state): State<AppState>) -> Json<OverlayResponse> {
    Json(OverlayResponse {
        overlay: state.shared.overlay().await,
    })
}
