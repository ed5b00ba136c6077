//! Domain entities

pub mod advisory;
pub mod pipeline_state;
pub mod weather_record;

pub use advisory::{AdvisoryOutcome, Alert};
pub use pipeline_state::{PipelineStage, PipelineState};
pub use weather_record::{WeatherCondition, WeatherRecord};
