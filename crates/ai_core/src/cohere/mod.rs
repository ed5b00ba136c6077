//! Cohere chat API inference engine
//!
//! Talks to the v2 chat endpoint (<https://docs.cohere.com/reference/chat>).

mod client;

pub use client::CohereInferenceEngine;
