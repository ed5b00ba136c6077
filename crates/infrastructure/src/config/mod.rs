//! Application configuration
//!
//! Layers, lowest precedence first: built-in defaults, an optional
//! `config.{toml,yaml,json}` in the working directory, then environment
//! variables prefixed with `CLIMATE_ADVISORY` using `__` between sections
//! (e.g. `CLIMATE_ADVISORY__SERVER__PORT=8080`).
//!
//! The two API keys additionally fall back to the plain `WEATHER_API_KEY`
//! and `COHERE_API_KEY` variables.

mod server;

use std::path::Path;

use ai_core::InferenceConfig;
use application::ApplicationError;
use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use server::ServerConfig;

/// Prefix for layered environment overrides
pub const ENV_PREFIX: &str = "CLIMATE_ADVISORY";

/// Fallback variable for the weather provider key
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Fallback variable for the language model key
pub const COHERE_API_KEY_VAR: &str = "COHERE_API_KEY";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required secret is absent or blank
    #[error("Missing required secret {0}; set it in the environment or a .env file")]
    MissingSecret(&'static str),

    /// A setting has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

fn default_log_filter() -> String {
    "info,climate_advisory=debug,tower_http=info".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Log level filter (`RUST_LOG` takes precedence)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            inference: InferenceConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the working directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layered(None)
    }

    /// Load configuration like [`AppConfig::load`], reading `path` instead
    /// of `./config.*` when given
    ///
    /// An explicit file must exist.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("config").required(false),
        };
        let builder = Self::builder()
            .add_source(file)
            .add_source(Self::env_source(None));

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.resolve_env_secrets();
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from defaults plus the given environment map
    pub fn load_from_env(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        let config = Self::builder()
            .add_source(Self::env_source(Some(vars)))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
    }

    fn env_source(vars: Option<config::Map<String, String>>) -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(vars)
    }

    /// Fill missing API keys from the conventional environment variables
    pub fn resolve_env_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill missing API keys using `lookup`
    ///
    /// Keys already set by a configuration layer are never overridden.
    pub fn resolve_secrets_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if !self.weather.has_api_key() {
            if let Some(val) = lookup(WEATHER_API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
                self.weather.api_key = Some(SecretString::from(val));
                debug!("Loaded weather.api_key from {WEATHER_API_KEY_VAR}");
            }
        }
        if !self.inference.has_api_key() {
            if let Some(val) = lookup(COHERE_API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
                self.inference.api_key = Some(SecretString::from(val));
                debug!("Loaded inference.api_key from {COHERE_API_KEY_VAR}");
            }
        }
    }

    /// Check that the configuration can serve requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weather.has_api_key() {
            return Err(ConfigError::MissingSecret(WEATHER_API_KEY_VAR));
        }
        if !self.inference.has_api_key() {
            return Err(ConfigError::MissingSecret(COHERE_API_KEY_VAR));
        }
        if self.weather.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("weather.base_url is empty".to_string()));
        }
        if self.inference.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("inference.base_url is empty".to_string()));
        }
        if self.inference.default_model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "inference.default_model is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings as JSON with secrets replaced by a presence marker
    pub fn redacted_json(&self) -> serde_json::Value {
        let marker = |key: Option<&SecretString>| match key {
            Some(k) if !k.expose_secret().is_empty() => "[REDACTED]",
            _ => "[NOT SET]",
        };

        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(weather) = value.get_mut("weather").and_then(|v| v.as_object_mut()) {
            weather.insert(
                "api_key".to_string(),
                marker(self.weather.api_key.as_ref()).into(),
            );
        }
        if let Some(inference) = value.get_mut("inference").and_then(|v| v.as_object_mut()) {
            inference.insert(
                "api_key".to_string(),
                marker(self.inference.api_key.as_ref()).into(),
            );
        }
        value
    }
}
