//! AI Core - Language-model inference
//!
//! Provides the inference engine abstraction and a client for the Cohere
//! chat API that produces the safety advisories.

pub mod cohere;
pub mod config;
pub mod error;
pub mod ports;

pub use cohere::CohereInferenceEngine;
pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
