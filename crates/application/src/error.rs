//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every pipeline failure is surfaced as exactly one of these variants.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Empty or missing location
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Weather provider call failed or returned no weather
    #[error("Could not fetch weather: {0}")]
    WeatherFetch(String),

    /// Weather response lacks a field the summary needs
    #[error("Malformed weather data: {0}")]
    MalformedWeatherData(String),

    /// Language-model call failed or produced no usable text
    #[error("Could not generate advisory: {0}")]
    Generation(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Stable machine-readable code for this error kind
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::WeatherFetch(_) => "weather_fetch_failed",
            Self::MalformedWeatherData(_) => "malformed_weather_data",
            Self::Generation(_) => "generation_failed",
            Self::Configuration(_) => "configuration_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Detail text without the kind prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(msg)
            | Self::WeatherFetch(msg)
            | Self::MalformedWeatherData(msg)
            | Self::Generation(msg)
            | Self::Configuration(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidLocation(msg) => Self::InvalidInput(msg),
            DomainError::MalformedWeatherData(msg) => Self::MalformedWeatherData(msg),
            DomainError::InvalidStateTransition(msg) => Self::Internal(msg),
        }
    }
}
