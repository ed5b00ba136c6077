//! Cohere inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{CohereInferenceEngine, InferenceConfig, InferenceEngine, InferenceRequest};
use application::{
    error::ApplicationError,
    ports::{GenerationOptions, InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for the Cohere chat API
#[derive(Debug)]
pub struct CohereInferenceAdapter {
    engine: CohereInferenceEngine,
}

impl CohereInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = CohereInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        ApplicationError::Generation(e.to_string())
    }
}

#[async_trait]
impl InferencePort for CohereInferenceAdapter {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let request = InferenceRequest::simple(prompt)
            .with_temperature(options.temperature)
            .with_max_tokens(options.max_tokens);

        let response = self.engine.generate(request).await.map_err(|e| {
            warn!(error = %e, "Cohere inference failed");
            Self::map_error(e)
        })?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            model = %response.model,
            latency_ms,
            finish_reason = ?response.finish_reason,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Cohere health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation() {
        let adapter = CohereInferenceAdapter::new(InferenceConfig::default());
        assert!(adapter.is_ok());
    }

    #[test]
    fn current_model_comes_from_config() {
        let adapter = CohereInferenceAdapter::new(InferenceConfig {
            default_model: "command-r".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(adapter.current_model(), "command-r");
    }

    #[test]
    fn errors_become_generation_errors() {
        for err in [
            ai_core::InferenceError::RateLimited,
            ai_core::InferenceError::EmptyResponse,
            ai_core::InferenceError::MissingApiKey,
            ai_core::InferenceError::Timeout(60000),
        ] {
            assert!(matches!(
                CohereInferenceAdapter::map_error(err),
                ApplicationError::Generation(_)
            ));
        }
    }
}
