//! SEO Checker - declarative structural SEO rules for HTML
//!
//! Validates an HTML document against a small set of rules (required
//! attributes, required elements, cardinality bounds) and reports every
//! violation as a human-readable message.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Checker -> RuleResolver -> RuleHandler -> Document
//! ```
//!
//! The checker binds each rule to the handlers that claim its shape, runs
//! them against the parsed document and joins the diagnostics in rule order.
//!
//! # Rules
//!
//! ```yaml
//! rules:
//!   - tag: img
//!     all:
//!       alt: "*"
//!   - tag: head meta
//!     contain:
//!       name: description
//!   - tag: h1
//!     limit:
//!       max: 1
//! ```
//!
//! # Custom rule kinds
//!
//! Implement [`RuleHandler`] and register it with
//! [`Checker::register_handler`]; existing handlers are left untouched.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod handler;
pub mod handlers;
pub mod output;
pub mod resolver;
pub mod rule;

// Re-export main types
pub use config::{Config, ConfigError};
pub use diagnostic::Diagnostic;
pub use document::{Document, Element, HtmlDocument, SelectorError};
pub use engine::{CheckError, Checker, Input, Report};
pub use handler::RuleHandler;
pub use handlers::{default_handlers, AllHandler, ContainHandler, LimitHandler};
pub use output::{JsonFormatter, OutputFormatter, TextFormatter};
pub use resolver::RuleResolver;
pub use rule::{load_rules, AttrValue, Conditions, Limit, Rule};
