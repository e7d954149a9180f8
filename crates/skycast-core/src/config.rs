//! Runtime configuration loaded from environment variables.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_LLM_URL: &str = "https://api.example-llm.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "mistral-small";
const DEFAULT_WEATHER_URL: &str = "http://api.weather.internal/current";
const DEFAULT_TIMEOUT_S: f64 = 3.0;
const DEFAULT_CACHE_TTL_S: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_S: f64 = 0.3;

/// Immutable runtime configuration.
///
/// Created once at process start from environment variables and shared
/// read-only by every component; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completions endpoint of the LLM provider.
    pub llm_url: Url,
    /// Model name sent with every chat request.
    pub llm_model: String,
    /// Bearer token for the LLM provider.
    pub api_key: String,
    /// Weather endpoint; expects `city` and `units` query parameters.
    pub weather_url: Url,
    /// Per-request HTTP timeout for both upstreams.
    pub timeout: Duration,
    /// How long a cached answer stays fresh.
    pub cache_ttl: Duration,
    /// Attempt budget for transient LLM failures.
    pub max_retries: u32,
    /// Base backoff; multiplied by the attempt number.
    pub backoff_base: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `LLM_URL`, `LLM_MODEL`, `LLM_API_KEY`,
    /// `WEATHER_URL`, `HTTP_TIMEOUT_S`, `CACHE_TTL_S`, `LLM_MAX_RETRIES`,
    /// `LLM_BACKOFF_S`. Unset variables fall back to defaults; values that
    /// are set but unparsable are a [`ConfigError`], never silently
    /// defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injectable variable lookup, so tests
    /// never have to touch process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("LLM_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("LLM_API_KEY is not set");
        }

        Ok(Self {
            llm_url: parse_url("LLM_URL", lookup("LLM_URL"), DEFAULT_LLM_URL)?,
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            api_key,
            weather_url: parse_url("WEATHER_URL", lookup("WEATHER_URL"), DEFAULT_WEATHER_URL)?,
            timeout: parse_secs("HTTP_TIMEOUT_S", lookup("HTTP_TIMEOUT_S"), DEFAULT_TIMEOUT_S)?,
            cache_ttl: Duration::from_secs(parse_number(
                "CACHE_TTL_S",
                lookup("CACHE_TTL_S"),
                DEFAULT_CACHE_TTL_S,
            )?),
            max_retries: parse_number(
                "LLM_MAX_RETRIES",
                lookup("LLM_MAX_RETRIES"),
                DEFAULT_MAX_RETRIES,
            )?,
            backoff_base: parse_secs("LLM_BACKOFF_S", lookup("LLM_BACKOFF_S"), DEFAULT_BACKOFF_S)?,
        })
    }
}

fn parse_url(key: &'static str, raw: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

fn parse_number<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: f64) -> Result<Duration, ConfigError> {
    let secs: f64 = parse_number(key, raw, default)?;
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.llm_model, "mistral-small");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_millis(300));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_overrides_are_honored() {
        let config = from_map(&[
            ("LLM_MODEL", "mistral-large"),
            ("LLM_API_KEY", "secret"),
            ("WEATHER_URL", "http://localhost:8080/weather"),
            ("HTTP_TIMEOUT_S", "0.5"),
            ("CACHE_TTL_S", "120"),
            ("LLM_MAX_RETRIES", "5"),
            ("LLM_BACKOFF_S", "1.5"),
        ])
        .unwrap();
        assert_eq!(config.llm_model, "mistral-large");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.weather_url.as_str(), "http://localhost:8080/weather");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.backoff_base, Duration::from_millis(1500));
    }

    #[test]
    fn test_unparsable_number_is_an_error() {
        let err = from_map(&[("LLM_MAX_RETRIES", "many")]).unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_RETRIES"));
    }

    #[test]
    fn test_negative_timeout_is_an_error() {
        assert!(from_map(&[("HTTP_TIMEOUT_S", "-1")]).is_err());
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let err = from_map(&[("WEATHER_URL", "not a url")]).unwrap_err();
        assert!(err.to_string().contains("WEATHER_URL"));
    }
}
