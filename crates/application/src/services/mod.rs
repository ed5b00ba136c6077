//! Application services - Use case implementations

mod advisory_generator;
mod advisory_pipeline;
mod summary_extractor;

pub use advisory_generator::{ADVISORY_PROMPT_TEMPLATE, AdvisoryGenerator, render_advisory_prompt};
pub use advisory_pipeline::{AdvisoryPipeline, Readiness};
pub use summary_extractor::extract_summary;
