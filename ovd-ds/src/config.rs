//! Configuration management for the detection session service
//!
//! TOML bootstrap file plus command-line/environment overrides.
//!
//! # Settings sources priority
//!
//! 1. Command-line arguments (clap also folds in environment variables)
//! 2. TOML configuration file
//! 3. Built-in defaults (code constants)

use crate::error::{Error, Result};
use ovd_common::config::LoggingConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Bootstrap configuration loaded from the TOML file
///
/// Every field has a built-in default so the service runs without any file
/// at all.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Detection tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Requested camera frame width
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,

    /// Requested camera frame height
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,

    /// Label producer selection: "catalogue" or "remote"
    #[serde(default = "default_label_source")]
    pub label_source: String,

    /// Base URL of the external inference service
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_port() -> u16 {
    5761
}

fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_frame_width() -> u32 {
    640
}

fn default_frame_height() -> u32 {
    480
}

fn default_label_source() -> String {
    "catalogue".to_string()
}

fn default_inference_url() -> String {
    "http://localhost:8000".to_string()
}

/// Which label producer drives the detection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSourceKind {
    /// Fabricated labels from the fixed catalogue (the default)
    Catalogue,
    /// Labels from the remote inference service
    Remote,
}

impl LabelSourceKind {
    /// Parse the configured value, falling back to the catalogue source on
    /// anything unrecognized.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "catalogue" => LabelSourceKind::Catalogue,
            "remote" => LabelSourceKind::Remote,
            other => {
                warn!(
                    "Unknown label_source '{}', using default 'catalogue'",
                    other
                );
                LabelSourceKind::Catalogue
            }
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub tick_interval_ms: u64,
    pub frame_width: u32,
    pub frame_height: u32,
    pub label_source: LabelSourceKind,
    pub inference_url: String,
    pub logging: LoggingConfig,
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub label_source: Option<String>,
    pub inference_url: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file and apply overrides.
    pub async fn load(toml_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let toml_config: TomlConfig = match toml_path {
            Some(path) => {
                let toml_str = tokio::fs::read_to_string(path).await.map_err(|e| {
                    Error::Config(format!("Failed to read config file {:?}: {}", path, e))
                })?;
                let parsed = toml::from_str(&toml_str)
                    .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
                info!("Loaded TOML configuration from {:?}", path);
                parsed
            }
            // Empty input yields every serde default.
            None => toml::from_str("")
                .map_err(|e| Error::Config(format!("Failed to build defaults: {}", e)))?,
        };

        let label_source = overrides
            .label_source
            .unwrap_or(toml_config.label_source);

        Ok(Config {
            port: overrides.port.unwrap_or(toml_config.port),
            tick_interval_ms: toml_config.tick_interval_ms,
            frame_width: toml_config.frame_width,
            frame_height: toml_config.frame_height,
            label_source: LabelSourceKind::parse_lossy(&label_source),
            inference_url: overrides.inference_url.unwrap_or(toml_config.inference_url),
            logging: toml_config.logging,
        })
    }

    /// Tick period as a Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
