//! Collaborator contracts consumed by the orchestration layer.
//!
//! The agent depends on these traits rather than on concrete clients, so
//! tests can substitute counting stubs and the transport details stay owned
//! by the implementing crates.

use async_trait::async_trait;

use crate::error::{LlmError, WeatherError};
use crate::types::{Units, WeatherRecord};

/// Fetches current weather for a city.
#[async_trait]
pub trait WeatherSource {
    /// One bounded network call. Implementations do not retry; weather
    /// failures surface immediately to the caller.
    async fn fetch(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError>;
}

/// Produces text from a prompt.
#[async_trait]
pub trait AnswerGenerator {
    /// Implementations retry transient failures internally; any error this
    /// returns is terminal for the request.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
