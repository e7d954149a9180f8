//! Weather client for Skycast.
//!
//! One bounded HTTP call per fetch against a JSON endpoint returning current
//! conditions. Failures surface immediately; the retry policy belongs to the
//! LLM path only.

mod client;

pub use client::WeatherClient;
