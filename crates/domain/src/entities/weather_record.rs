//! Weather record entity
//!
//! Provider-agnostic snapshot of current conditions for one location.
//! Every provider field is optional; the accessors used by the summary
//! report which field is missing instead of panicking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// One weather condition reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Provider condition code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Condition group (e.g. "Rain")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Free-text description (e.g. "light rain")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WeatherCondition {
    /// Create a condition carrying only a description
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Current weather for a location, in metric units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Location name as echoed by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Reported conditions, most significant first
    #[serde(default)]
    pub conditions: Vec<WeatherCondition>,
    /// Temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Feels-like temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    /// Relative humidity in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    /// Atmospheric pressure in hPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<u16>,
    /// Wind gust in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    /// When the provider observed these conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    /// Provider status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Provider diagnostic message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WeatherRecord {
    /// Build a record from the three fields the summary needs
    pub fn new(description: impl Into<String>, temperature: f64, wind_speed: f64) -> Self {
        Self {
            conditions: vec![WeatherCondition::described(description)],
            temperature: Some(temperature),
            wind_speed: Some(wind_speed),
            ..Default::default()
        }
    }

    /// Description of the first reported condition
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedWeatherData` if there is no condition
    /// or the first one has a missing or blank description.
    pub fn primary_description(&self) -> Result<&str, DomainError> {
        let first = self
            .conditions
            .first()
            .ok_or_else(|| DomainError::missing_field("weather[0]"))?;
        first
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| DomainError::missing_field("weather[0].description"))
    }

    /// Temperature in °C
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedWeatherData` if the provider sent none.
    pub fn temperature(&self) -> Result<f64, DomainError> {
        self.temperature
            .ok_or_else(|| DomainError::missing_field("main.temp"))
    }

    /// Wind speed in m/s
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedWeatherData` if the provider sent none.
    pub fn wind_speed(&self) -> Result<f64, DomainError> {
        self.wind_speed
            .ok_or_else(|| DomainError::missing_field("wind.speed"))
    }
}
