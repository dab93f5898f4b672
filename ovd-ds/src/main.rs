//! Detection Session service (ovd-ds) - Main entry point
//!
//! Hosts the session state machine and the timer-driven detection loop
//! behind an HTTP/SSE control interface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use ovd_ds::api;
use ovd_ds::capability::{Camera, LogSpeech, SpeechSynth, TestPatternCamera};
use ovd_ds::config::{Config, ConfigOverrides, LabelSourceKind};
use ovd_ds::detect::{CatalogueSource, InferenceClient, LabelSource, RemoteSource};
use ovd_ds::engine::DetectionEngine;
use ovd_ds::state::SharedState;

/// Command-line arguments for ovd-ds
#[derive(Parser, Debug)]
#[command(name = "ovd-ds")]
#[command(about = "Detection Session service for OVD")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "OVD_DS_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "OVD_DS_PORT")]
    port: Option<u16>,

    /// Label producer: "catalogue" or "remote"
    #[arg(long, env = "OVD_LABEL_SOURCE")]
    label_source: Option<String>,

    /// Base URL of the external inference service
    #[arg(long, env = "OVD_INFERENCE_URL")]
    inference_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    ovd_common::config::init_tracing("ovd_ds=debug,tower_http=debug");

    let args = Args::parse();

    let config = Config::load(
        args.config.as_deref(),
        ConfigOverrides {
            port: args.port,
            label_source: args.label_source,
            inference_url: args.inference_url,
        },
    )
    .await
    .context("Failed to load configuration")?;

    info!("Starting OVD Detection Session service on port {}", config.port);

    let shared = Arc::new(SharedState::new());
    let camera: Arc<dyn Camera> = Arc::new(TestPatternCamera::new());
    let speech: Arc<dyn SpeechSynth> = Arc::new(LogSpeech::new());

    let source: Arc<dyn LabelSource> = match config.label_source {
        LabelSourceKind::Catalogue => {
            info!("Label source: fabricated catalogue");
            Arc::new(CatalogueSource::new())
        }
        LabelSourceKind::Remote => {
            info!("Label source: remote inference at {}", config.inference_url);
            let client = InferenceClient::new(config.inference_url.as_str())
                .context("Failed to build inference client")?;
            Arc::new(RemoteSource::new(client))
        }
    };

    let engine = Arc::new(DetectionEngine::new(
        Arc::clone(&shared),
        camera,
        speech,
        source,
        &config,
    ));
    info!("Detection engine initialized");

    let app_state = api::AppState {
        engine: Arc::clone(&engine),
        shared,
        port: config.port,
    };
    let app = api::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Shutdown is an exit path too: give the camera back.
    engine.stop().await.ok();

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
