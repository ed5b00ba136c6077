//! Pipeline wiring
//!
//! Builds an [`AdvisoryPipeline`] over the real HTTP adapters.

use std::sync::Arc;

use application::{AdvisoryPipeline, ApplicationError, InferencePort, WeatherPort};
use tracing::info;

use crate::{
    adapters::{CohereInferenceAdapter, WeatherAdapter},
    config::AppConfig,
};

/// Create the advisory pipeline described by `config`
///
/// The configuration is validated first, so a missing API key fails here
/// rather than on the first request.
pub fn build_advisory_pipeline(config: &AppConfig) -> Result<AdvisoryPipeline, ApplicationError> {
    config.validate()?;

    let weather: Arc<dyn WeatherPort> =
        Arc::new(WeatherAdapter::with_config(config.weather.clone())?);
    let inference: Arc<dyn InferencePort> =
        Arc::new(CohereInferenceAdapter::new(config.inference.clone())?);

    info!(
        weather_url = %config.weather.base_url,
        model = %config.inference.default_model,
        "Advisory pipeline ready"
    );

    Ok(AdvisoryPipeline::new(weather, inference))
}
