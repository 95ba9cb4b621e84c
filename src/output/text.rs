//! Plain text output: one message per line

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::Report;

/// Newline-separated messages, empty when the report is clean
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> String {
        report
            .diagnostics
            .iter()
            .map(|d| self.format_diagnostic(d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        diagnostic.message.clone()
    }
}
