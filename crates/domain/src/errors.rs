//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location name is empty or whitespace-only
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A weather record is missing a field the summary needs
    #[error("Malformed weather data: {0}")]
    MalformedWeatherData(String),

    /// A pipeline field was written out of order or twice
    #[error("Invalid pipeline transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Create a malformed-data error for a missing field path
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MalformedWeatherData(format!("missing field `{}`", path.into()))
    }
}
