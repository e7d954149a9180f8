//! High-level orchestrator combining weather, LLM, and the answer cache.

use skycast_core::{AgentError, AnswerGenerator, Units, WeatherRecord, WeatherSource};

use crate::cache::TtlCache;

/// Fixed response for a blank city; returned without touching any
/// collaborator.
pub const INVALID_CITY_MESSAGE: &str = "Please provide a valid city.";

/// Orchestrator for one weather question.
///
/// Owns an injected answer cache and the two upstream collaborators; there
/// is no global state, so every construction is isolated. Each `answer`
/// call runs strictly sequentially — the prompt depends on the weather
/// data, so there is nothing to parallelize. Concurrent invocations for the
/// same key may each miss the cache and call upstream independently;
/// single-flight deduplication is out of scope.
pub struct WeatherAgent<W, G> {
    weather: W,
    generator: G,
    cache: TtlCache<String>,
}

impl<W, G> WeatherAgent<W, G>
where
    W: WeatherSource,
    G: AnswerGenerator,
{
    pub fn new(weather: W, generator: G, cache: TtlCache<String>) -> Self {
        Self {
            weather,
            generator,
            cache,
        }
    }

    /// The answer cache. Exposed so callers can inspect or pre-warm entries.
    pub fn cache(&self) -> &TtlCache<String> {
        &self.cache
    }

    /// Stable composite key: two requests with the same trimmed city and
    /// units always map to the same entry.
    fn cache_key(city: &str, units: Units) -> String {
        format!("{}:{}", city, units)
    }

    fn build_prompt(city: &str, units: Units, record: &WeatherRecord) -> String {
        format!(
            "Give a friendly 1-2 sentence weather update.\nCity: {}\nTemp (°{}): {}\nDescription: {}\n",
            city,
            units.degree_label(),
            record.temperature,
            record.description,
        )
    }

    /// Produce a short natural-language weather answer for `city`.
    ///
    /// Cache hits return without any upstream call. On a miss the weather
    /// fetch and the LLM call run in order and the answer is cached; every
    /// upstream failure propagates unchanged and leaves the cache unset.
    pub async fn answer(&self, city: &str, units: Units) -> Result<String, AgentError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(INVALID_CITY_MESSAGE.to_string());
        }

        let key = Self::cache_key(city, units);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(cached);
        }

        let record = self.weather.fetch(city, units).await?;
        let prompt = Self::build_prompt(city, units, &record);
        let text = self.generator.generate(&prompt).await?;

        self.cache.set(&key, text.clone());
        Ok(text)
    }
}
