//! Pipeline state threaded through one advisory run
//!
//! The state is rebuilt at every stage: each transition consumes the
//! previous value and returns a new one with exactly one more field set.
//! Fields are written in the fixed order location → weather → summary → alert.

use std::fmt;

use serde::Serialize;

use crate::{
    entities::{AdvisoryOutcome, Alert, WeatherRecord},
    errors::DomainError,
    value_objects::LocationName,
};

/// Stage of a pipeline run, derived from which fields are populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Only the location is known
    PendingFetch,
    /// Weather fetched, summary not yet derived
    PendingExtraction,
    /// Summary derived, advisory not yet generated
    PendingGeneration,
    /// All fields populated
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PendingFetch => "pending fetch",
            Self::PendingExtraction => "pending extraction",
            Self::PendingGeneration => "pending generation",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// State of a single advisory run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineState {
    location: LocationName,
    weather: Option<WeatherRecord>,
    summary: Option<String>,
    alert: Option<Alert>,
}

impl PipelineState {
    /// Start a run for a location
    #[must_use]
    pub const fn new(location: LocationName) -> Self {
        Self {
            location,
            weather: None,
            summary: None,
            alert: None,
        }
    }

    /// Current stage
    #[must_use]
    pub fn stage(&self) -> PipelineStage {
        match (&self.weather, &self.summary, &self.alert) {
            (None, _, _) => PipelineStage::PendingFetch,
            (Some(_), None, _) => PipelineStage::PendingExtraction,
            (Some(_), Some(_), None) => PipelineStage::PendingGeneration,
            (Some(_), Some(_), Some(_)) => PipelineStage::Done,
        }
    }

    /// Location the run was started for
    #[must_use]
    pub fn location(&self) -> &LocationName {
        &self.location
    }

    /// Fetched weather, if the fetch stage has completed
    #[must_use]
    pub fn weather(&self) -> Option<&WeatherRecord> {
        self.weather.as_ref()
    }

    /// Derived summary, if the extraction stage has completed
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Generated alert, if the generation stage has completed
    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Record the fetched weather
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the run is
    /// pending fetch.
    pub fn with_weather(self, weather: WeatherRecord) -> Result<Self, DomainError> {
        self.expect_stage(PipelineStage::PendingFetch, "weather")?;
        Ok(Self {
            weather: Some(weather),
            ..self
        })
    }

    /// Record the derived summary
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the run is
    /// pending extraction.
    pub fn with_summary(self, summary: impl Into<String>) -> Result<Self, DomainError> {
        self.expect_stage(PipelineStage::PendingExtraction, "summary")?;
        Ok(Self {
            summary: Some(summary.into()),
            ..self
        })
    }

    /// Record the generated alert
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the run is
    /// pending generation.
    pub fn with_alert(self, alert: Alert) -> Result<Self, DomainError> {
        self.expect_stage(PipelineStage::PendingGeneration, "alert")?;
        Ok(Self {
            alert: Some(alert),
            ..self
        })
    }

    /// Project the finished run onto the caller-facing outcome
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the run is not done.
    pub fn into_outcome(self) -> Result<AdvisoryOutcome, DomainError> {
        let stage = self.stage();
        match (self.summary, self.alert) {
            (Some(summary), Some(alert)) if stage == PipelineStage::Done => {
                Ok(AdvisoryOutcome { summary, alert })
            },
            _ => Err(DomainError::InvalidStateTransition(format!(
                "cannot produce an outcome while {stage}"
            ))),
        }
    }

    fn expect_stage(&self, expected: PipelineStage, field: &str) -> Result<(), DomainError> {
        let actual = self.stage();
        if actual == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition(format!(
                "cannot set {field} while {actual}"
            )))
        }
    }
}
