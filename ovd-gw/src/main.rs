//! Gateway service (ovd-gw) - Main entry point
//!
//! Serves the navigation surface, the mock auth API over the SQLite
//! key-value store, and the detection proxy.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use ovd_common::auth::AuthGate;
use ovd_common::store::{KvStore, SqliteStore};
use ovd_gw::api;
use ovd_gw::config::{Config, ConfigOverrides};
use ovd_gw::proxy::ProxyClient;

/// Command-line arguments for ovd-gw
#[derive(Parser, Debug)]
#[command(name = "ovd-gw")]
#[command(about = "Gateway service for OVD")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "OVD_GW_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "OVD_GW_PORT")]
    port: Option<u16>,

    /// Path to the SQLite database backing the auth store
    #[arg(short, long, env = "OVD_GW_DATABASE")]
    database: Option<String>,

    /// Base URL of the external inference service
    #[arg(long, env = "OVD_INFERENCE_URL")]
    inference_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    ovd_common::config::init_tracing("ovd_gw=debug,tower_http=debug");

    let args = Args::parse();

    let config = Config::load(
        args.config.as_deref(),
        ConfigOverrides {
            port: args.port,
            database_path: args.database,
            inference_url: args.inference_url,
        },
    )
    .await
    .context("Failed to load configuration")?;

    info!("Starting OVD Gateway on port {}", config.port);
    info!("Inference service: {}", config.inference_url);

    let store: Arc<dyn KvStore> = Arc::new(
        SqliteStore::open(&config.database_path)
            .await
            .context("Failed to open auth store")?,
    );

    let gate = Arc::new(AuthGate::new(store));
    match gate.restore().await.context("Failed to restore identity")? {
        Some(identity) => info!("Restored identity for {}", identity.username),
        None => info!("No persisted identity"),
    }

    let proxy =
        ProxyClient::new(config.inference_url.as_str()).context("Failed to build proxy client")?;

    let ctx = api::AppContext {
        gate,
        proxy,
        port: config.port,
    };
    let app = api::create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

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
