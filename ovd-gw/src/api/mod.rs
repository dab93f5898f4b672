//! HTTP surface for the gateway
//!
//! Page routes, the mock auth API, and the detection proxy endpoint.

pub mod handlers;
pub mod pages;

use crate::proxy::ProxyClient;
use axum::{
    routing::{get, post},
    Router,
};
use ovd_common::auth::AuthGate;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub gate: Arc<AuthGate>,
    pub proxy: ProxyClient,
    pub port: u16,
}

/// Create the gateway router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Navigation surface
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup))
        .route("/about", get(pages::about))
        .route("/detector", get(pages::detector))
        // Health check
        .route("/health", get(handlers::health))
        // Detection proxy
        .route("/api/detect", post(handlers::detect))
        // Mock auth API
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/identity", get(handlers::identity))
        // Connection-status SSE stream
        .route("/events", get(handlers::event_stream))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
