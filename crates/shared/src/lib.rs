//! Shared library for the Kitsu catalog client.
//!
//! This crate provides common functionality used by the catalog crate:
//! - Configuration management
//! - Logging infrastructure
//! - Domain models and fetch state
//! - Text helpers for rendering entries

pub mod config;
pub mod display;
pub mod logging;
pub mod models;
pub mod state;

// Re-export commonly used types
pub use config::{CatalogConfig, Config, LoggingConfig};
pub use logging::LogConfig;
pub use models::*;
pub use state::FetchState;
