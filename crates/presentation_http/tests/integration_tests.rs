//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{
    AdvisoryPipeline,
    error::ApplicationError,
    ports::{GenerationOptions, InferencePort, InferenceResult, WeatherPort},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::{LocationName, WeatherRecord};
use infrastructure::TemplateEngine;
use presentation_http::{REQUEST_ID_HEADER, routes::create_router, state::AppState};
use serde_json::json;

/// Weather port answering from a fixed result
struct StubWeather {
    result: Result<WeatherRecord, String>,
    available: bool,
    calls: Arc<AtomicUsize>,
}

impl StubWeather {
    fn clear() -> Self {
        Self {
            result: Ok(WeatherRecord::new("clear sky", 31.5, 4.2)),
            available: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            available: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn returning(record: WeatherRecord) -> Self {
        Self {
            result: Ok(record),
            ..Self::clear()
        }
    }
}

#[async_trait]
impl WeatherPort for StubWeather {
    async fn fetch_current(
        &self,
        _location: &LocationName,
    ) -> Result<WeatherRecord, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(ApplicationError::WeatherFetch)
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

/// Inference port answering with a fixed advisory
struct StubInference {
    response: String,
    healthy: bool,
}

impl StubInference {
    fn new() -> Self {
        Self {
            response: "Stay hydrated.\nAvoid outdoor work at midday.".to_string(),
            healthy: true,
        }
    }

    fn silent() -> Self {
        Self {
            response: "   ".to_string(),
            healthy: false,
        }
    }
}

#[async_trait]
impl InferencePort for StubInference {
    async fn generate(
        &self,
        _prompt: &str,
        _options: GenerationOptions,
    ) -> Result<InferenceResult, ApplicationError> {
        Ok(InferenceResult {
            content: self.response.clone(),
            model: "stub-model".to_string(),
            tokens_used: Some(42),
            latency_ms: 5,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn current_model(&self) -> String {
        "stub-model".to_string()
    }
}

fn server_with(weather: StubWeather, inference: StubInference) -> TestServer {
    let pipeline = AdvisoryPipeline::new(Arc::new(weather), Arc::new(inference));
    let templates = TemplateEngine::new().expect("templates compile");
    let router = create_router(AppState::new(pipeline, templates));
    TestServer::new(router).expect("Failed to create test server")
}

fn create_test_server() -> TestServer {
    server_with(StubWeather::clear(), StubInference::new())
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_endpoint_returns_ready_when_backends_respond() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["weather"]["healthy"], true);
    assert_eq!(body["inference"]["model"], "stub-model");
}

#[tokio::test]
async fn readiness_endpoint_returns_unavailable_when_backend_down() {
    let server = server_with(StubWeather::failing("down"), StubInference::silent());

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["weather"]["healthy"], false);
    assert!(body["inference"].get("model").is_none());
}

// ============ JSON Advisory Tests ============

#[tokio::test]
async fn advisory_returns_summary_and_alert() {
    let server = create_test_server();

    let response = server
        .post("/v1/advisory")
        .json(&json!({ "location": "Surat" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["summary"],
        "Clear sky with temperature of 31.5°C and wind speed 4.2 m/s."
    );
    assert_eq!(
        body["alert"]["message"],
        "Stay hydrated.\nAvoid outdoor work at midday."
    );
}

#[tokio::test]
async fn advisory_rejects_blank_location_without_fetching() {
    let weather = StubWeather::clear();
    let calls = Arc::clone(&weather.calls);
    let server = server_with(weather, StubInference::new());

    let response = server
        .post("/v1/advisory")
        .json(&json!({ "location": "   " }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "invalid_input");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn advisory_missing_location_is_invalid_input() {
    let server = create_test_server();

    let response = server.post("/v1/advisory").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn advisory_weather_failure_is_bad_gateway() {
    let server = server_with(StubWeather::failing("city not found"), StubInference::new());

    let response = server
        .post("/v1/advisory")
        .json(&json!({ "location": "Atlantis" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "weather_fetch_failed");
    assert!(body["error"].as_str().unwrap().contains("city not found"));
}

#[tokio::test]
async fn advisory_malformed_weather_is_bad_gateway() {
    let record = WeatherRecord {
        temperature: Some(20.0),
        wind_speed: Some(1.0),
        ..WeatherRecord::default()
    };
    let server = server_with(StubWeather::returning(record), StubInference::new());

    let response = server
        .post("/v1/advisory")
        .json(&json!({ "location": "Surat" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "malformed_weather_data");
}

#[tokio::test]
async fn advisory_empty_generation_is_bad_gateway() {
    let server = server_with(StubWeather::clear(), StubInference::silent());

    let response = server
        .post("/v1/advisory")
        .json(&json!({ "location": "Surat" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "generation_failed");
}

#[tokio::test]
async fn advisory_invalid_json_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/v1/advisory")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

// ============ Form Tests ============

#[tokio::test]
async fn form_page_renders_empty_input() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("name=\"location\""));
    assert!(!html.contains("Climate Warning</strong>"));
}

#[tokio::test]
async fn form_submit_shows_summary_and_alert() {
    let server = create_test_server();

    let response = server
        .post("/")
        .form(&[("location", "Ahmedabad")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("value=\"Ahmedabad\""));
    assert!(html.contains("Clear sky with temperature of 31.5°C and wind speed 4.2 m/s."));
    assert!(html.contains("Stay hydrated.<br>"));
}

#[tokio::test]
async fn form_submit_failure_keeps_location_and_shows_banner() {
    let server = server_with(StubWeather::failing("city not found"), StubInference::new());

    let response = server
        .post("/")
        .form(&[("location", "Atlantis")])
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let html = response.text();
    assert!(html.contains("value=\"Atlantis\""));
    assert!(html.contains("banner weather"));
    assert!(html.contains("city not found"));
}

#[tokio::test]
async fn form_submit_blank_shows_invalid_input_banner() {
    let server = create_test_server();

    let response = server.post("/").form(&[("location", "")]).await;

    response.assert_status_bad_request();
    assert!(response.text().contains("banner invalid_input"));
}

// ============ Middleware Tests ============

#[tokio::test]
async fn responses_carry_generated_request_id() {
    let server = create_test_server();

    let response = server.get("/health").await;

    let header = response.header(REQUEST_ID_HEADER);
    let id = uuid_from(header.to_str().expect("ascii header"));
    assert_eq!(id.get_version_num(), 7);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let server = create_test_server();
    let sent = "0190c3a2-7b1e-7c4d-8e5f-123456789abc";

    let response = server
        .get("/health")
        .add_header(REQUEST_ID_HEADER, sent)
        .await;

    assert_eq!(response.header(REQUEST_ID_HEADER), sent);
}

fn uuid_from(s: &str) -> uuid::Uuid {
    uuid::Uuid::parse_str(s).expect("valid uuid")
}
