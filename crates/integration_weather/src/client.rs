//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiResponse, CurrentWeather};

/// Location used by the health check
const HEALTH_CHECK_LOCATION: &str = "London";

/// Upper bound for a single health check request
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No API key configured
    #[error("Weather API key is not configured")]
    MissingApiKey,

    /// API key rejected by the provider
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The provider does not know the location
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Successful response without a `weather` block
    #[error("Response contained no weather data: {0}")]
    MissingWeatherData(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// OpenWeatherMap API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

impl WeatherConfig {
    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current weather for a named location
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch(
        &self,
        location: &str,
        timeout: Duration,
    ) -> Result<CurrentWeather, WeatherError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        let url = self.endpoint();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    WeatherError::ConnectionFailed(e.without_url().to_string())
                } else {
                    WeatherError::RequestFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))?;

        if !status.is_success() {
            let err = Self::status_error(status, &body);
            warn!(status = %status, error = %err, "Weather provider rejected request");
            return Err(err);
        }

        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        if api_response.weather.is_none() {
            let message = api_response
                .message_text()
                .unwrap_or_else(|| "no `weather` field in response".to_string());
            return Err(WeatherError::MissingWeatherData(message));
        }

        Ok(CurrentWeather::from(api_response))
    }

    /// Map a non-success status to an error, carrying the provider message
    fn status_error(status: StatusCode, body: &str) -> WeatherError {
        let message = serde_json::from_str::<ApiResponse>(body)
            .ok()
            .and_then(|r| r.message_text())
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized(message),
            StatusCode::NOT_FOUND => WeatherError::LocationNotFound(message),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(message),
            _ => WeatherError::RequestFailed(message),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        self.fetch(location, Duration::from_secs(self.config.timeout_secs))
            .await
    }

    /// Looks up a fixed location with a short timeout.
    ///
    /// Each call is a real current-weather request and counts against the
    /// API key's quota.
    async fn is_healthy(&self) -> bool {
        let timeout = HEALTH_CHECK_TIMEOUT.min(Duration::from_secs(self.config.timeout_secs));
        self.fetch(HEALTH_CHECK_LOCATION, timeout).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = WeatherConfig {
            api_key: Some(SecretString::from("super-secret-key")),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = WeatherConfig {
            api_key: Some(SecretString::from("super-secret-key")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: WeatherConfig =
            serde_json::from_str(r#"{"api_key": "abc"}"#).expect("should deserialize");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.has_api_key());
    }

    #[test]
    fn test_blank_key_is_not_a_key() {
        let config = WeatherConfig {
            api_key: Some(SecretString::from("   ")),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenWeatherMapClient::new(WeatherConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:1234/weather");
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        match OpenWeatherMapClient::status_error(StatusCode::NOT_FOUND, body) {
            WeatherError::LocationNotFound(msg) => assert_eq!(msg, "city not found"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            OpenWeatherMapClient::status_error(StatusCode::UNAUTHORIZED, "{}"),
            WeatherError::Unauthorized(_)
        ));
        assert!(matches!(
            OpenWeatherMapClient::status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            WeatherError::RateLimitExceeded
        ));
        assert!(matches!(
            OpenWeatherMapClient::status_error(StatusCode::BAD_GATEWAY, "oops"),
            WeatherError::ServiceUnavailable(_)
        ));
        match OpenWeatherMapClient::status_error(StatusCode::BAD_REQUEST, "not json") {
            WeatherError::RequestFailed(msg) => assert!(msg.contains("400")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::LocationNotFound("city not found".to_string());
        assert_eq!(err.to_string(), "Location not found: city not found");

        let err = WeatherError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));
    }
}
