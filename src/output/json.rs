//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::Report;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: &'a [Diagnostic],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    rules_evaluated: usize,
    rules_unmatched: usize,
    diagnostic_count: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> String {
        let output = JsonOutput {
            diagnostics: &report.diagnostics,
            summary: JsonSummary {
                rules_evaluated: report.rules_evaluated,
                rules_unmatched: report.rules_unmatched,
                diagnostic_count: report.diagnostics.len(),
                duration_ms: report.duration.as_millis(),
            },
        };

        self.render(&output)
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.render(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_diagnostic() {
        let formatter = JsonFormatter::new();
        let diag = Diagnostic::new(3, "head title", "limit", "This HTML has less than 1 <title> tag");

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains("\"rule_index\":3"));
        assert!(output.contains("\"tag\":\"head title\""));
        assert!(output.contains("\"handler\":\"limit\""));
    }

    #[test]
    fn test_json_format_report() {
        let formatter = JsonFormatter::new();
        let report = Report {
            diagnostics: vec![Diagnostic::new(0, "img", "all", "msg")],
            rules_evaluated: 7,
            ..Default::default()
        };

        let output = formatter.format(&report);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["summary"]["rules_evaluated"], 7);
        assert_eq!(value["summary"]["diagnostic_count"], 1);
        assert_eq!(value["diagnostics"][0]["message"], "msg");
    }

    #[test]
    fn test_json_pretty() {
        let formatter = JsonFormatter::new().pretty();
        let diag = Diagnostic::new(0, "a", "all", "msg");

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains('\n'));
    }
}
