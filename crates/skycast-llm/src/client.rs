//! Chat-completions client with transient-failure retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use skycast_core::{AnswerGenerator, Config, LlmError};

use crate::protocol::{ChatMessage, ChatRequest, ChatResponse};

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Client for an LLM chat-completions API.
///
/// One `generate` call makes up to `max_retries` attempts. Transient
/// failures (timeout, connection refused/reset) back off and try again;
/// bad statuses and malformed payloads return immediately.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    url: Url,
    model: String,
    api_key: String,
    max_retries: u32,
    backoff_base: Duration,
    temperature: f32,
}

impl LlmClient {
    /// Create a client from the runtime configuration.
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Self::with_url(
            config.llm_url.clone(),
            config.llm_model.clone(),
            config.api_key.clone(),
            config.timeout,
            config.max_retries,
            config.backoff_base,
        )
    }

    /// Create a client against an explicit endpoint (used by tests).
    pub fn with_url(
        url: Url,
        model: String,
        api_key: String,
        timeout: Duration,
        max_retries: u32,
        backoff_base: Duration,
    ) -> Result<Self, LlmError> {
        if api_key.is_empty() {
            tracing::warn!("llm api key is empty");
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url,
            model,
            api_key,
            max_retries,
            backoff_base,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Override the sampling temperature (default 0.7).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Backoff after attempt `n`. Linear on purpose: the budget is small
    /// and the delays stay predictable.
    fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }

    async fn attempt(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Payload(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Payload("empty choices list".to_string()))?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl AnswerGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let mut last_transient = None;

        for attempt in 1..=self.max_retries {
            match self.attempt(prompt).await {
                Ok(text) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "llm call succeeded after retries");
                    }
                    return Ok(text);
                }
                Err(err) if err.is_transient() => {
                    tracing::warn!(attempt, error = %err, "transient llm failure");
                    tokio::time::sleep(self.backoff_for_attempt(attempt)).await;
                    if let LlmError::Transport(e) = err {
                        last_transient = Some(e);
                    }
                }
                Err(err) => {
                    tracing::error!(attempt, error = %err, "llm call failed");
                    return Err(err);
                }
            }
        }

        tracing::error!(attempts = self.max_retries, "llm retry budget exhausted");
        Err(LlmError::Exhausted {
            attempts: self.max_retries,
            source: last_transient,
        })
    }
}
