//! Core checker engine

use crate::diagnostic::Diagnostic;
use crate::document::{Document, HtmlDocument, SelectorError};
use crate::handler::RuleHandler;
use crate::handlers::default_handlers;
use crate::output::{OutputFormatter, TextFormatter};
use crate::resolver::RuleResolver;
use crate::rule::Rule;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Message returned by [`Checker::run`] when the report went to a file
pub const WRITE_CONFIRMATION: &str = "The results are written to output file successfully";

/// Errors surfaced by a check run
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("The input html file is required")]
    InputMissing,

    #[error("Failed to read input data from {origin}: {reason}")]
    ReadFailure { origin: String, reason: String },

    #[error("Failed to write results to output file {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Where the HTML comes from
pub enum Input {
    /// A file on disk
    Path(PathBuf),
    /// An already-open stream
    Reader(Box<dyn Read>),
}

impl Input {
    /// Read from standard input
    pub fn stdin() -> Self {
        Input::Reader(Box::new(std::io::stdin()))
    }

    /// Origin used in error messages
    pub fn origin(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Reader(_) => "<stream>".to_string(),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

impl From<&Path> for Input {
    fn from(path: &Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input({})", self.origin())
    }
}

/// Read the whole input as text. Empty input counts as a read failure.
pub fn read_input(input: Input) -> Result<String, CheckError> {
    let origin = input.origin();
    let failure = |reason: String| CheckError::ReadFailure {
        origin: origin.clone(),
        reason,
    };

    let bytes = match input {
        Input::Path(path) => std::fs::read(&path).map_err(|e| failure(e.to_string()))?,
        Input::Reader(mut reader) => {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .map_err(|e| failure(e.to_string()))?;
            buf
        }
    };

    if bytes.is_empty() {
        return Err(failure("no data".to_string()));
    }

    log::debug!("Read {} bytes from {}", bytes.len(), origin);
    // Invalid UTF-8 sequences become U+FFFD
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a rendered report to a file
pub fn write_output(path: &Path, content: &str) -> Result<(), CheckError> {
    std::fs::write(path, content).map_err(|e| CheckError::WriteFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Result of one check
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// All diagnostics, in rule order then handler order
    pub diagnostics: Vec<Diagnostic>,

    /// Rules evaluated
    pub rules_evaluated: usize,

    /// Rules that no handler claimed
    pub rules_unmatched: usize,

    /// Evaluation duration
    pub duration: Duration,
}

impl Report {
    /// True when no rule was violated
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Exit code (0 = clean, 1 = violations)
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }

    /// Messages in report order
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

/// The main checker engine
pub struct Checker {
    /// Registered handlers, in evaluation order
    handlers: Vec<Arc<dyn RuleHandler>>,

    /// Rules used when a run does not supply its own
    default_rules: Vec<Rule>,
}

impl Checker {
    /// Create a checker with the built-in handlers
    pub fn new(default_rules: Vec<Rule>) -> Self {
        Self::with_handlers(default_rules, default_handlers())
    }

    /// Create a checker with an explicit handler list
    pub fn with_handlers(default_rules: Vec<Rule>, handlers: Vec<Arc<dyn RuleHandler>>) -> Self {
        Self {
            handlers,
            default_rules,
        }
    }

    /// Register an additional handler; it runs after the existing ones
    pub fn register_handler(&mut self, handler: Arc<dyn RuleHandler>) {
        self.handlers.push(handler);
    }

    pub fn handlers(&self) -> &[Arc<dyn RuleHandler>] {
        &self.handlers
    }

    pub fn default_rules(&self) -> &[Rule] {
        &self.default_rules
    }

    /// Bind a rule to the handlers that claim it
    pub fn resolve<'a>(&'a self, rule: &'a Rule) -> RuleResolver<'a> {
        RuleResolver::new(rule, &self.handlers)
    }

    /// Check a parsed document against a rule set
    pub fn check(&self, document: &dyn Document, rules: &[Rule]) -> Result<Report, CheckError> {
        let start = Instant::now();
        let mut report = Report::default();

        for (index, rule) in rules.iter().enumerate() {
            let resolver = self.resolve(rule);
            if resolver.is_empty() {
                log::warn!("Rule #{} ({}) matches no handler, skipping", index, rule);
                report.rules_unmatched += 1;
            }
            report.diagnostics.extend(resolver.validate(document, index)?);
            report.rules_evaluated += 1;
        }

        report.duration = start.elapsed();
        log::info!(
            "Checked {} rules: {} diagnostic(s) in {:?}",
            report.rules_evaluated,
            report.diagnostics.len(),
            report.duration
        );
        Ok(report)
    }

    /// Parse HTML and check it; `None` uses the default rule set
    pub fn check_html(&self, html: &str, rules: Option<&[Rule]>) -> Result<Report, CheckError> {
        let document = HtmlDocument::parse(html);
        self.check(&document, rules.unwrap_or(self.default_rules.as_slice()))
    }

    /// Read an input and check it
    pub fn run_report(&self, input: Input, rules: Option<&[Rule]>) -> Result<Report, CheckError> {
        let html = read_input(input)?;
        self.check_html(&html, rules)
    }

    /// Render a report, then either return the text or write it to `output`
    /// and return a confirmation message
    pub fn emit(
        &self,
        report: &Report,
        output: Option<&Path>,
        formatter: &dyn OutputFormatter,
    ) -> Result<String, CheckError> {
        let rendered = formatter.format(report);

        match output {
            Some(path) => {
                write_output(path, &rendered)?;
                log::info!("Report written to {}", path.display());
                Ok(WRITE_CONFIRMATION.to_string())
            }
            None => Ok(rendered),
        }
    }

    /// End-to-end run: read, check, and either return the plain-text report
    /// or write it to `output` and return a confirmation message
    pub fn run(
        &self,
        input: Option<Input>,
        rules: Option<&[Rule]>,
        output: Option<&Path>,
    ) -> Result<String, CheckError> {
        let input = input.ok_or(CheckError::InputMissing)?;
        let report = self.run_report(input, rules)?;
        self.emit(&report, output, &TextFormatter)
    }
}
