//! Template engine module for rendering the advisory page and report
//!
//! Uses Tera with templates embedded at compile time:
//! - `advisory/page.html`: the form page with summary, advisory or error banner
//! - `advisory/report.txt`: the terminal report printed by the CLI
//!
//! HTML templates are auto-escaped.

use std::collections::HashMap;
use std::sync::Arc;

use application::ApplicationError;
use domain::AdvisoryOutcome;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use thiserror::Error;

/// Template name of the HTML page
pub const PAGE_TEMPLATE: &str = "advisory/page.html";

/// Template name of the terminal report
pub const REPORT_TEMPLATE: &str = "advisory/report.txt";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

impl From<TemplateError> for ApplicationError {
    fn from(err: TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Create a new empty template context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }
}

/// Which banner the page shows for a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    /// The location was empty
    InvalidInput,
    /// Weather could not be fetched or was incomplete
    Weather,
    /// The advisory could not be generated
    Generation,
    /// The service is not configured
    Configuration,
    /// Anything else
    Internal,
}

impl BannerKind {
    /// Banner matching an application error
    pub const fn for_error(err: &ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidInput(_) => Self::InvalidInput,
            ApplicationError::WeatherFetch(_) | ApplicationError::MalformedWeatherData(_) => {
                Self::Weather
            },
            ApplicationError::Generation(_) => Self::Generation,
            ApplicationError::Configuration(_) => Self::Configuration,
            ApplicationError::Internal(_) => Self::Internal,
        }
    }

    /// Banner heading
    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidInput => "Please enter a valid location.",
            Self::Weather => "Weather data unavailable",
            Self::Generation => "Advisory unavailable",
            Self::Configuration => "Service not configured",
            Self::Internal => "Something went wrong",
        }
    }
}

/// Banner text for internal errors
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Error banner shown on the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBanner {
    /// Banner kind, used as CSS class
    pub kind: BannerKind,
    /// Heading
    pub title: String,
    /// Error detail
    pub message: String,
}

/// Data for the advisory page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryPageData {
    /// Location as the user entered it
    pub location: String,
    /// Weather summary of a successful run
    #[serde(default)]
    pub summary: Option<String>,
    /// Advisory message of a successful run
    #[serde(default)]
    pub alert: Option<String>,
    /// Banner of a failed run
    #[serde(default)]
    pub error: Option<PageBanner>,
}

impl AdvisoryPageData {
    /// Empty form
    pub fn blank() -> Self {
        Self::default()
    }

    /// Page for a completed run
    pub fn completed(location: impl Into<String>, outcome: &AdvisoryOutcome) -> Self {
        Self {
            location: location.into(),
            summary: Some(outcome.summary.clone()),
            alert: Some(outcome.alert.message.clone()),
            error: None,
        }
    }

    /// Page for a failed run
    ///
    /// Internal errors show a generic message; their details stay in the logs.
    pub fn failed(location: impl Into<String>, err: &ApplicationError) -> Self {
        let kind = BannerKind::for_error(err);
        let message = match kind {
            BannerKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => err.to_string(),
        };
        Self {
            location: location.into(),
            summary: None,
            alert: None,
            error: Some(PageBanner {
                kind,
                title: kind.title().to_string(),
                message,
            }),
        }
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const ADVISORY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Climate Warning Assistant</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
        form { display: flex; gap: 0.5rem; margin: 1rem 0; }
        input[type=text] { flex: 1; padding: 0.5rem; }
        .banner { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
        .summary { background: #e6f4ea; }
        .alert { background: #fff4e5; }
        .invalid_input, .configuration, .internal { background: #fdecea; }
        .weather { background: #fde7d9; }
        .generation { background: #fdf1d9; }
    </style>
</head>
<body>
    <h1>🌦️ Climate Warning Assistant</h1>
    <p>Get real-time weather summaries and safety alerts for any location.</p>
    <form method="post" action="/">
        <label for="location">📍 Enter location (e.g., Surat):</label>
        <input type="text" id="location" name="location" value="{{ location }}">
        <button type="submit">Get Warning</button>
    </form>
{% if error %}
    <div class="banner {{ error.kind }}" role="alert">
        <strong>❌ {{ error.title }}</strong>
        <p>{{ error.message }}</p>
    </div>
{% endif %}{% if summary %}
    <div class="banner summary">
        <strong>✅ Weather Summary</strong>
        <p>{{ summary }}</p>
    </div>
{% endif %}{% if alert %}
    <div class="banner alert">
        <strong>⚠️ Climate Warning</strong>
        <p>{{ alert | escape | linebreaksbr | safe }}</p>
    </div>
{% endif %}
</body>
</html>
"#;

    pub const ADVISORY_REPORT: &str = r"
⚠️ Climate Warning:
{{ alert }}
{% if show_summary %}
🌦️ {{ summary }}
{% endif %}";
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl TemplateEngine {
    /// Create a template engine with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm", ".xml"]);

        tera.add_raw_template(PAGE_TEMPLATE, embedded::ADVISORY_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template(REPORT_TEMPLATE, embedded::ADVISORY_REPORT)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        tera.register_filter("linebreaksbr", linebreaksbr_filter);

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render the advisory page
    pub fn render_page(&self, data: &AdvisoryPageData) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new();
        ctx.insert("location", &data.location);
        ctx.insert("summary", &data.summary);
        ctx.insert("alert", &data.alert);
        ctx.insert("error", &data.error);
        self.render(PAGE_TEMPLATE, &ctx)
    }

    /// Render the terminal report
    pub fn render_report(
        &self,
        outcome: &AdvisoryOutcome,
        show_summary: bool,
    ) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new();
        ctx.insert("summary", &outcome.summary);
        ctx.insert("alert", &outcome.alert.message);
        ctx.insert("show_summary", &show_summary);
        self.render(REPORT_TEMPLATE, &ctx)
    }
}

/// Custom filter: Convert line breaks to <br> tags
fn linebreaksbr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("linebreaksbr requires a string"))?;
    Ok(Value::String(s.replace('\n', "<br>\n")))
}
