//! Core types and configuration for Skycast.
//!
//! Provides the runtime [`Config`], the centralized error hierarchy, shared
//! domain types, and the collaborator traits implemented by the weather and
//! LLM clients.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{AgentError, ConfigError, LlmError, WeatherError};
pub use traits::{AnswerGenerator, WeatherSource};
pub use types::{Units, WeatherRecord};

use anyhow::Result;

/// Initialize the core (tracing/logging).
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!("Skycast core initialized");
    Ok(())
}
