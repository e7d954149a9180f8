use anyhow::{Context, Result};

use skycast_agent::{TtlCache, WeatherAgent};
use skycast_core::{Config, Units};
use skycast_llm::LlmClient;
use skycast_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    skycast_core::init()?;

    let config = Config::from_env().context("Invalid configuration")?;

    let city = std::env::args().nth(1).unwrap_or_default();
    let units = match std::env::args().nth(2) {
        Some(raw) => raw.parse::<Units>().context("Invalid units")?,
        None => Units::default(),
    };

    let weather = WeatherClient::new(&config).context("Failed to create weather client")?;
    let llm = LlmClient::new(&config).context("Failed to create LLM client")?;
    let agent = WeatherAgent::new(weather, llm, TtlCache::new(config.cache_ttl));

    match agent.answer(&city, units).await {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(err) => {
            // The real cause stays in the logs; callers only see a generic body.
            tracing::error!(error = %err, city = %city, "request failed");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }
}
