//! Adapters implementing application ports

mod cohere_inference_adapter;
mod weather_adapter;

pub use cohere_inference_adapter::CohereInferenceAdapter;
pub use weather_adapter::WeatherAdapter;
