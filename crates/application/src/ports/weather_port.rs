//! Weather service port
//!
//! Defines the interface for current-weather retrieval.

use async_trait::async_trait;
use domain::{LocationName, WeatherRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather provider operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current weather for a named location in metric units
    ///
    /// Performs exactly one provider call; failures are not retried.
    async fn fetch_current(&self, location: &LocationName)
    -> Result<WeatherRecord, ApplicationError>;

    /// Check if the weather provider is reachable
    async fn is_available(&self) -> bool;
}
