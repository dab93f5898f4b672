//! # OVD Gateway Library (ovd-gw)
//!
//! Navigation surface and outer API for the OVD demo: mock auth endpoints
//! over the injectable key-value store, the gated detector page, and the
//! single-forward `/api/detect` proxy to the external inference service.

pub mod api;
pub mod config;
pub mod error;
pub mod proxy;

pub use error::{Error, Result};
