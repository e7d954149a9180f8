//! HTTP client for the weather endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use skycast_core::{Config, Units, WeatherError, WeatherRecord, WeatherSource};

/// Wire shape of the weather endpoint. Both fields are required; a body
/// missing either one fails the fetch instead of degrading the answer.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    temp: f64,
    desc: String,
}

/// Client for a weather endpoint returning structured JSON.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: Url,
}

impl WeatherClient {
    /// Create a client with the endpoint and timeout from `config`.
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        Self::with_base_url(config.weather_url.clone(), config.timeout)
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError> {
        tracing::debug!(city, units = %units, "fetching weather");

        // city and units travel as query parameters, never spliced into the URL
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("city", city), ("units", units.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(city, %status, "weather upstream error");
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await?;
        let payload: WeatherPayload = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(city, error = %e, "weather payload rejected");
            WeatherError::Payload(e.to_string())
        })?;

        Ok(WeatherRecord {
            temperature: payload.temp,
            description: payload.desc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        let url = Url::parse(&server.uri()).unwrap();
        WeatherClient::with_base_url(url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_validated_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("city", "Istanbul"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temp": 18,
                "desc": "clear"
            })))
            .mount(&server)
            .await;

        let record = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap();

        assert_eq!(record.temperature, 18.0);
        assert_eq!(record.description, "clear");
    }

    #[tokio::test]
    async fn test_imperial_units_are_forwarded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temp": 64.4,
                "desc": "clear"
            })))
            .mount(&server)
            .await;

        let record = client_for(&server)
            .fetch("Istanbul", Units::Imperial)
            .await
            .unwrap();

        assert_eq!(record.temperature, 64.4);
    }

    #[tokio::test]
    async fn test_non_success_status_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry() {
        let server = MockServer::start().await;

        // expect(1) is verified when the server drops
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Status(_)));
    }

    #[tokio::test]
    async fn test_missing_description_is_payload_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temp": 18
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Payload(_)));
    }

    #[tokio::test]
    async fn test_null_temperature_is_payload_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temp": null,
                "desc": "clear"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Payload(_)));
    }

    #[tokio::test]
    async fn test_non_object_body_is_payload_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Istanbul", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Payload(_)));
    }
}
