//! Application state

use std::sync::Arc;

use application::AdvisoryPipeline;
use infrastructure::TemplateEngine;

/// Shared application state
///
/// Every request runs its own pipeline pass; nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Advisory pipeline
    pub pipeline: Arc<AdvisoryPipeline>,

    /// Page templates
    pub templates: TemplateEngine,
}

impl AppState {
    /// Create state from its parts
    pub fn new(pipeline: AdvisoryPipeline, templates: TemplateEngine) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            templates,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
