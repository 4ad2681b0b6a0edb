//! Common utilities and shared functionality for the Bookshelf data-access layer.
//!
//! This crate provides foundational utilities used across the workspace:
//! - Configuration management (environment-driven)
//! - Telemetry setup (structured logging via `tracing`)

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, TelemetryConfig};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
