//! Orchestration layer for Skycast.
//!
//! Ties the answer cache, weather source, and answer generator into one
//! sequential flow per request: cache lookup, weather fetch, prompt build,
//! LLM call, cache fill.

mod agent;
mod cache;

pub use agent::{WeatherAgent, INVALID_CITY_MESSAGE};
pub use cache::TtlCache;
