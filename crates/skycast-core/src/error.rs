//! Centralized error types for Skycast.
//!
//! The taxonomy mirrors the propagation policy of the service: weather and
//! LLM failures surface unmodified to the agent's caller, and only transient
//! LLM transport failures are recovered locally by the retry loop. There are
//! no fallback or sentinel values anywhere; malformed data is a typed
//! failure.

use reqwest::StatusCode;
use thiserror::Error;

/// Weather fetch errors.
///
/// All of these are fatal for the request: the weather path never retries,
/// since a deterministic upstream error would fail the same way again and
/// stale or partial weather data only degrades the answer.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network-level failure (connect, timeout, broken transfer).
    #[error("weather transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream replied with a non-success status.
    #[error("weather upstream returned status {0}")]
    Status(StatusCode),

    /// Body decoded but did not match the expected shape.
    #[error("unexpected weather payload: {0}")]
    Payload(String),
}

/// LLM generation errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network-level failure. Timeouts and connection errors are transient
    /// and retried by the client; other transport failures are terminal.
    #[error("llm transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream replied with a non-success status. Terminal: a bad status is
    /// not expected to self-resolve on retry.
    #[error("llm upstream returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body decoded but did not contain `choices[0].message.content`.
    #[error("unexpected llm payload: {0}")]
    Payload(String),

    /// The transient-failure retry budget ran out.
    #[error("llm unavailable after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl LlmError {
    /// Whether the retry loop may attempt again after this error.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Top-level error for one `answer` invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("weather lookup failed: {0}")]
    Weather(#[from] WeatherError),

    #[error("answer generation failed: {0}")]
    Llm(#[from] LlmError),
}

impl AgentError {
    /// Generic user-facing body. The underlying cause is recorded via
    /// tracing only and never exposed to the caller.
    pub fn user_message(&self) -> &'static str {
        "Upstream service error"
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_generic() {
        let weather = AgentError::Weather(WeatherError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        let llm = AgentError::Llm(LlmError::Payload("missing choices".into()));
        assert_eq!(weather.user_message(), "Upstream service error");
        assert_eq!(llm.user_message(), "Upstream service error");
    }

    #[test]
    fn test_status_and_payload_are_not_transient() {
        let status = LlmError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert!(!status.is_transient());
        assert!(!LlmError::Payload("bad".into()).is_transient());
        assert!(!LlmError::Exhausted { attempts: 3, source: None }.is_transient());
    }

    #[test]
    fn test_weather_status_display_names_code() {
        let err = WeatherError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_exhausted_display_names_attempt_count() {
        let err = LlmError::Exhausted { attempts: 3, source: None };
        assert!(err.to_string().contains('3'));
    }
}
