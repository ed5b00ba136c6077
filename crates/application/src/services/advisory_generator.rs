//! Advisory generation - prompts the language model for a safety warning

use std::{fmt, sync::Arc, time::Instant};

use domain::Alert;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{GenerationOptions, InferencePort},
};

/// Prompt sent to the language model; `{location}` and `{summary}` are substituted
pub const ADVISORY_PROMPT_TEMPLATE: &str = "Generate a safety warning for rural people based on this weather summary.\n\nLocation: {location}\nWeather Summary: {summary}\n\nKeep it simple, local, and actionable.";

/// Render the advisory prompt for one location and summary
///
/// Placeholders are filled in a single pass, so braces inside the inputs
/// are copied verbatim.
pub fn render_advisory_prompt(location: &str, summary: &str) -> String {
    let mut prompt =
        String::with_capacity(ADVISORY_PROMPT_TEMPLATE.len() + location.len() + summary.len());
    let mut rest = ADVISORY_PROMPT_TEMPLATE;

    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{location}") {
            prompt.push_str(location);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{summary}") {
            prompt.push_str(summary);
            rest = after;
        } else {
            prompt.push('{');
            rest = &tail[1..];
        }
    }
    prompt.push_str(rest);
    prompt
}

/// Turns a location and weather summary into an [`Alert`]
pub struct AdvisoryGenerator {
    inference: Arc<dyn InferencePort>,
    options: GenerationOptions,
}

impl fmt::Debug for AdvisoryGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryGenerator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AdvisoryGenerator {
    /// Create a generator using the fixed advisory sampling settings
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self {
            inference,
            options: GenerationOptions::ADVISORY,
        }
    }

    /// Sampling settings sent with every request
    pub const fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Generate the advisory
    ///
    /// The completion is trimmed; an empty completion is an error rather
    /// than a blank alert.
    #[instrument(skip(self, summary), fields(summary_len = summary.len()))]
    pub async fn generate(&self, location: &str, summary: &str) -> Result<Alert, ApplicationError> {
        let start = Instant::now();
        let prompt = render_advisory_prompt(location, summary);

        let result = self
            .inference
            .generate(&prompt, self.options)
            .await
            .map_err(|e| {
                warn!(error = %e, "Advisory generation failed");
                match e {
                    ApplicationError::Generation(msg) => ApplicationError::Generation(msg),
                    other => ApplicationError::Generation(other.to_string()),
                }
            })?;

        let message = result.content.trim();
        if message.is_empty() {
            warn!(model = %result.model, "Language model returned an empty advisory");
            return Err(ApplicationError::Generation(
                "language model returned an empty response".to_string(),
            ));
        }

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Advisory generated"
        );

        Ok(Alert::new(message))
    }
}
