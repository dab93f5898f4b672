//! HTTP control interface for the detection session service

pub mod handlers;
pub mod sse;

use crate::engine::DetectionEngine;
use crate::state::SharedState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Detection engine
    pub engine: Arc<DetectionEngine>,
    /// Session state (also reachable through the engine; handlers read it
    /// directly)
    pub shared: Arc<SharedState>,
    /// Server port
    pub port: u16,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Session lifecycle
        .route("/session/start", post(handlers::start_session))
        .route("/session/stop", post(handlers::stop_session))
        .route("/session/tick", post(handlers::trigger_tick))
        // Session observation
        .route("/session/state", get(handlers::get_session_state))
        .route("/session/labels", get(handlers::get_labels))
        .route("/session/overlay", get(handlers::get_overlay))
        // SSE event stream
        .route("/events", get(sse::event_stream))
        .with_state(state)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
