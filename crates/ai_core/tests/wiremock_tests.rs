//! Integration tests for the Cohere inference engine using WireMock
//!
//! These tests mock the Cohere HTTP API to verify client behavior without
//! network access or a real API key.

use ai_core::{CohereInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn inference_config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        base_url: base_url.to_string(),
        default_model: "command-r-plus".to_string(),
        timeout_ms: 5000,
        api_key: Some(SecretString::from("test-key")),
    }
}

fn engine_for(mock_server: &MockServer) -> CohereInferenceEngine {
    #[allow(clippy::expect_used)]
    CohereInferenceEngine::new(inference_config_for_mock(&mock_server.uri()))
        .expect("Failed to create engine")
}

/// Sample Cohere v2 chat success response
fn chat_success_response() -> serde_json::Value {
    serde_json::json!({
        "id": "c14c80c3-18eb-4519-9460-6c92edd8cfb4",
        "finish_reason": "COMPLETE",
        "message": {
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Heavy rain expected. Move livestock to higher ground."}
            ]
        },
        "usage": {
            "billed_units": {"input_tokens": 45, "output_tokens": 12},
            "tokens": {"input_tokens": 250, "output_tokens": 12}
        }
    })
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_generate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let response = engine
        .generate(InferenceRequest::simple("Weather summary"))
        .await
        .unwrap();

    assert_eq!(
        response.content,
        "Heavy rain expected. Move livestock to higher ground."
    );
    assert_eq!(response.model, "command-r-plus");
    assert_eq!(response.finish_reason.as_deref(), Some("COMPLETE"));

    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 250);
    assert_eq!(usage.completion_tokens, 12);
    assert_eq!(usage.total_tokens, 262);
}

#[tokio::test]
async fn test_generate_sends_bearer_and_sampling_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "command-r-plus",
            "messages": [{"role": "user", "content": "Weather summary"}],
            "temperature": 0.5,
            "max_tokens": 300,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = InferenceRequest::simple("Weather summary")
        .with_temperature(0.5)
        .with_max_tokens(300);
    let result = engine.generate(request).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_generate_without_settings_omits_sampling_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    engine
        .generate(InferenceRequest::simple("Weather summary"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("temperature").is_none());
    assert!(body.get("max_tokens").is_none());
    assert_eq!(body["model"], "command-r-plus");
}

#[tokio::test]
async fn test_request_settings_override_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "command-r",
            "max_tokens": 50
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let request = InferenceRequest::simple("Hi")
        .with_model("command-r")
        .with_max_tokens(50);
    let response = engine.generate(request).await.unwrap();

    assert_eq!(response.model, "command-r");
}

#[tokio::test]
async fn test_generate_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "invalid api token"})),
        )
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(
        matches!(&result, Err(InferenceError::Unauthorized(msg)) if msg == "invalid api token"),
        "Expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn test_generate_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::RateLimited)));
}

#[tokio::test]
async fn test_generate_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::ServerError(_))));
}

#[tokio::test]
async fn test_generate_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_generate_empty_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "finish_reason": "MAX_TOKENS",
            "message": {"role": "assistant", "content": []}
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::EmptyResponse)));
}

#[tokio::test]
async fn test_generate_without_key_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = InferenceConfig {
        api_key: None,
        ..inference_config_for_mock(&mock_server.uri())
    };
    let engine = CohereInferenceEngine::new(config).unwrap();
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::MissingApiKey)));
}

#[tokio::test]
async fn test_generate_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_success_response())
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = InferenceConfig {
        timeout_ms: 100,
        ..inference_config_for_mock(&mock_server.uri())
    };
    let engine = CohereInferenceEngine::new(config).unwrap();
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(
        matches!(result, Err(InferenceError::Timeout(100))),
        "Expected Timeout, got: {result:?}"
    );
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(query_param("page_size", "1"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "command-r-plus"}]
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert!(engine.health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_rejected_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert!(!engine.health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_connection_refused() {
    let config = inference_config_for_mock("http://127.0.0.1:1");
    let engine = CohereInferenceEngine::new(config).unwrap();
    assert!(!engine.health_check().await.unwrap());
}
