//! Shared configuration for the stockpulse workspace.
//!
//! Every binary loads one [`AppConfig`] at startup and passes the relevant
//! pieces down by reference; there is no ambient global state.

use thiserror::Error;

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
