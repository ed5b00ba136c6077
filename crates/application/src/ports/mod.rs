//! Port definitions (interfaces for external systems)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod inference_port;
pub mod weather_port;

pub use inference_port::{GenerationOptions, InferencePort, InferenceResult};
pub use weather_port::WeatherPort;

#[cfg(test)]
pub use inference_port::MockInferencePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
