//! Advisory pipeline - fetch, extract, generate
//!
//! One run walks a fresh [`PipelineState`] through its four stages. Each
//! step is awaited before the next starts and the first failure ends the
//! run; callers get the complete outcome or a single error.

use std::{fmt, sync::Arc, time::Instant};

use domain::{AdvisoryOutcome, LocationName, PipelineState};
use tracing::{debug, info, instrument, warn};

use super::{advisory_generator::AdvisoryGenerator, summary_extractor::extract_summary};
use crate::{
    error::ApplicationError,
    ports::{InferencePort, WeatherPort},
};

/// Backend availability as seen by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Weather provider reachable
    pub weather: bool,
    /// Language model reachable
    pub inference: bool,
}

impl Readiness {
    /// Whether both backends are available
    pub const fn is_ready(&self) -> bool {
        self.weather && self.inference
    }
}

/// Orchestrates a single advisory run
pub struct AdvisoryPipeline {
    weather: Arc<dyn WeatherPort>,
    inference: Arc<dyn InferencePort>,
    generator: AdvisoryGenerator,
}

impl fmt::Debug for AdvisoryPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryPipeline")
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl AdvisoryPipeline {
    /// Create a pipeline over the two backend ports
    pub fn new(weather: Arc<dyn WeatherPort>, inference: Arc<dyn InferencePort>) -> Self {
        let generator = AdvisoryGenerator::new(Arc::clone(&inference));
        Self {
            weather,
            inference,
            generator,
        }
    }

    /// Name of the model producing advisories
    pub fn model(&self) -> String {
        self.inference.current_model()
    }

    /// Run the full pipeline for a location
    ///
    /// The location is validated before any backend is contacted.
    #[instrument(skip(self, location), fields(location = %location.trim()))]
    pub async fn run(&self, location: &str) -> Result<AdvisoryOutcome, ApplicationError> {
        let start = Instant::now();
        let location = LocationName::new(location)?;
        let state = PipelineState::new(location);

        let state = self.fetch(state).await?;
        let state = Self::extract(state)?;
        let state = self.generate(state).await?;

        let outcome = state.into_outcome()?;
        info!(
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Advisory run completed"
        );
        Ok(outcome)
    }

    #[instrument(skip_all, fields(stage = %state.stage()))]
    async fn fetch(&self, state: PipelineState) -> Result<PipelineState, ApplicationError> {
        let weather = self
            .weather
            .fetch_current(state.location())
            .await
            .map_err(|e| {
                warn!(error = %e, "Weather fetch failed");
                wrap_weather_error(e)
            })?;
        Ok(state.with_weather(weather)?)
    }

    fn extract(state: PipelineState) -> Result<PipelineState, ApplicationError> {
        let summary = state
            .weather()
            .map(extract_summary)
            .transpose()?
            .ok_or_else(|| {
                ApplicationError::Internal("weather missing before extraction".to_string())
            })?;
        debug!(summary = %summary, "Weather summarised");
        Ok(state.with_summary(summary)?)
    }

    async fn generate(&self, state: PipelineState) -> Result<PipelineState, ApplicationError> {
        let summary = state.summary().ok_or_else(|| {
            ApplicationError::Internal("summary missing before generation".to_string())
        })?;
        let alert = self
            .generator
            .generate(state.location().as_str(), summary)
            .await?;
        Ok(state.with_alert(alert)?)
    }

    /// Check both backends
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> Readiness {
        let weather = self.weather.is_available().await;
        let inference = self.inference.is_healthy().await;
        debug!(weather, inference, "Backend readiness checked");
        Readiness { weather, inference }
    }

    /// Whether both backends respond
    pub async fn is_ready(&self) -> bool {
        self.readiness().await.is_ready()
    }
}

fn wrap_weather_error(err: ApplicationError) -> ApplicationError {
    match err {
        e @ (ApplicationError::WeatherFetch(_)
        | ApplicationError::MalformedWeatherData(_)
        | ApplicationError::Configuration(_)) => e,
        other => ApplicationError::WeatherFetch(other.detail().to_string()),
    }
}
