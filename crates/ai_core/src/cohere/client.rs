//! Cohere client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

/// Timeout for the model-list health check
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Inference engine backed by the Cohere chat API
pub struct CohereInferenceEngine {
    client: Client,
    config: InferenceConfig,
}

impl std::fmt::Debug for CohereInferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereInferenceEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CohereInferenceEngine {
    /// Create a new Cohere inference engine
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Cohere inference engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given path
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    fn api_key(&self) -> Result<&str, InferenceError> {
        self.config
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
            .ok_or(InferenceError::MissingApiKey)
    }

    /// Map a non-success status to an error
    fn status_error(status: StatusCode, body: &str) -> InferenceError {
        let message = serde_json::from_str::<CohereErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("Status {status}"));

        match status {
            StatusCode::UNAUTHORIZED => InferenceError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            s if s.is_server_error() => InferenceError::ServerError(message),
            _ => InferenceError::RequestFailed(message),
        }
    }
}

/// Cohere v2 chat request
#[derive(Debug, Serialize)]
struct CohereChatRequest<'a> {
    model: &'a str,
    messages: Vec<CohereMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct CohereMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Cohere v2 chat response
#[derive(Debug, Deserialize)]
struct CohereChatResponse {
    #[serde(default)]
    finish_reason: Option<String>,
    message: CohereResponseMessage,
    #[serde(default)]
    usage: Option<CohereUsage>,
}

#[derive(Debug, Deserialize)]
struct CohereResponseMessage {
    #[serde(default)]
    content: Vec<CohereContent>,
}

#[derive(Debug, Deserialize)]
struct CohereContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CohereUsage {
    #[serde(default)]
    tokens: Option<CohereTokens>,
}

#[derive(Debug, Deserialize)]
struct CohereTokens {
    #[serde(default)]
    input_tokens: Option<f64>,
    #[serde(default)]
    output_tokens: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CohereErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl CohereChatResponse {
    /// Concatenated text of all text content blocks
    fn text(&self) -> String {
        self.message
            .content
            .iter()
            .filter(|c| c.kind == "text")
            .filter_map(|c| c.text.as_deref())
            .collect()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn token_usage(&self) -> Option<TokenUsage> {
        let tokens = self.usage.as_ref()?.tokens.as_ref()?;
        match (tokens.input_tokens, tokens.output_tokens) {
            (Some(prompt), Some(completion)) => {
                let prompt = prompt.max(0.0) as u32;
                let completion = completion.max(0.0) as u32;
                Some(TokenUsage {
                    prompt_tokens: prompt,
                    completion_tokens: completion,
                    total_tokens: prompt.saturating_add(completion),
                })
            },
            _ => None,
        }
    }
}

#[async_trait]
impl InferenceEngine for CohereInferenceEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let api_key = self.api_key()?;
        let model = self.resolve_model(&request);

        let chat_request = CohereChatRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| CohereMessage {
                    role: &m.role,
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        debug!(
            temperature = ?chat_request.temperature,
            max_tokens = ?chat_request.max_tokens,
            "Sending chat request to Cohere"
        );

        let response = self
            .client
            .post(self.api_url("v2/chat"))
            .bearer_auth(api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::status_error(status, &body);
            warn!(status = %status, error = %err, "Inference request failed");
            return Err(err);
        }

        let chat_response: CohereChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.without_url().to_string()))?;

        let content = chat_response.text();
        if content.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        let usage = chat_response.token_usage();
        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: model.to_string(),
            usage,
            finish_reason: chat_response.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let Ok(api_key) = self.api_key() else {
            return Ok(false);
        };

        let response = self
            .client
            .get(self.api_url("v1/models"))
            .query(&[("page_size", "1")])
            .bearer_auth(api_key)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) if e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.without_url().to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
