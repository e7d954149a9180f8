//! LLM chat client for Skycast.
//!
//! Wraps a chat-completions endpoint with transient-failure retry and strict
//! payload validation. Bad statuses and malformed payloads are terminal; only
//! timeouts and connection failures are retried, with linear backoff.

mod client;
mod protocol;

pub use client::LlmClient;
