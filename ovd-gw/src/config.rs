//! Configuration management for the gateway service
//!
//! Same shape as the detection service: TOML bootstrap with serde
//! defaults, command-line/environment overrides on top.

use crate::error::{Error, Result};
use ovd_common::config::LoggingConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Bootstrap configuration loaded from the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the SQLite database backing the auth gate's store
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Base URL of the external inference service the proxy forwards to
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_port() -> u16 {
    5760
}

fn default_database_path() -> String {
    "ovd-gw.db".to_string()
}

fn default_inference_url() -> String {
    "http://localhost:8000".to_string()
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub inference_url: String,
    pub logging: LoggingConfig,
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_path: Option<String>,
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
            None => toml::from_str("")
                .map_err(|e| Error::Config(format!("Failed to build defaults: {}", e)))?,
        };

        Ok(Config {
            port: overrides.port.unwrap_or(toml_config.port),
            database_path: overrides
                .database_path
                .unwrap_or(toml_config.database_path),
            inference_url: overrides.inference_url.unwrap_or(toml_config.inference_url),
            logging: toml_config.logging,
        })
    }
}
