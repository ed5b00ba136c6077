//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the process
//! concerns shared by both binaries: configuration, logging, templates and
//! pipeline wiring.

pub mod adapters;
pub mod config;
pub mod pipeline;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, ServerConfig};
pub use pipeline::build_advisory_pipeline;
pub use telemetry::{LogFormat, LogOutput, LoggingError, init_logging};
pub use templates::{AdvisoryPageData, BannerKind, TemplateContext, TemplateEngine, TemplateError};
