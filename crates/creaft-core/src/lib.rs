//! Shared configuration and domain types for CREAFT.
//!
//! Holds the env-driven application config and the content/metric domain
//! model shared by the collector, scoring, persistence, and API crates.

pub mod app_config;
pub mod config;
pub mod content;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{ContentRecord, MetricSnapshot};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
