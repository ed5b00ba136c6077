//! Advisory output formatting

use domain::AdvisoryOutcome;
use infrastructure::TemplateEngine;

/// Render an outcome as the terminal report or as pretty JSON
pub fn render_outcome(
    outcome: &AdvisoryOutcome,
    json: bool,
    show_summary: bool,
    templates: &TemplateEngine,
) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }
    Ok(templates.render_report(outcome, show_summary)?)
}

#[cfg(test)]
mod tests {
    use domain::Alert;

    use super::*;

    fn outcome() -> AdvisoryOutcome {
        AdvisoryOutcome {
            summary: "Haze with temperature of 31°C and wind speed 3.6 m/s.".to_string(),
            alert: Alert::new("Wear a mask outdoors."),
        }
    }

    #[test]
    fn report_starts_with_warning_header() {
        let templates = TemplateEngine::new().unwrap();
        let text = render_outcome(&outcome(), false, false, &templates).unwrap();

        assert!(text.contains("⚠️ Climate Warning:\nWear a mask outdoors."));
        assert!(!text.contains("Haze"));
    }

    #[test]
    fn report_can_include_summary() {
        let templates = TemplateEngine::new().unwrap();
        let text = render_outcome(&outcome(), false, true, &templates).unwrap();
        assert!(text.contains("Haze with temperature of 31°C"));
    }

    #[test]
    fn json_contains_summary_and_alert() {
        let templates = TemplateEngine::new().unwrap();
        let text = render_outcome(&outcome(), true, false, &templates).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["alert"]["message"], "Wear a mask outdoors.");
        assert!(value["summary"].as_str().unwrap().starts_with("Haze"));
    }
}
