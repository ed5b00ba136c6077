//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{LocationName, WeatherCondition, WeatherRecord};
use integration_weather::{
    CurrentWeather, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using the OpenWeatherMap API
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey => ApplicationError::Configuration(err.to_string()),
            other => ApplicationError::WeatherFetch(other.to_string()),
        }
    }

    /// Convert provider weather into the domain record
    fn map_current(current: CurrentWeather) -> WeatherRecord {
        WeatherRecord {
            location_name: current.location_name,
            conditions: current
                .conditions
                .into_iter()
                .map(|c| WeatherCondition {
                    id: c.id,
                    main: c.main,
                    description: c.description,
                })
                .collect(),
            temperature: current.temperature,
            feels_like: current.feels_like,
            humidity: current.humidity,
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            wind_direction: current.wind_direction,
            wind_gust: current.wind_gust,
            observed_at: current.observed_at,
            status_code: current.status_code,
            message: current.message,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn fetch_current(
        &self,
        location: &LocationName,
    ) -> Result<WeatherRecord, ApplicationError> {
        let current = self
            .client
            .get_current(location.as_str())
            .await
            .map_err(Self::map_error)?;

        debug!(
            resolved = ?current.location_name,
            conditions = current.conditions.len(),
            "Weather fetched"
        );

        Ok(Self::map_current(current))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
