//! Rule handler trait: one implementation per rule shape

use crate::document::{Document, SelectorError};
use crate::rule::Rule;

/// A stateless validator for one rule shape
///
/// New rule kinds are added by implementing this trait and registering the
/// handler with the [`Checker`](crate::engine::Checker); the resolver and the
/// engine never need to change.
pub trait RuleHandler: Send + Sync {
    /// Handler identifier (e.g., "all", "contain", "limit")
    fn id(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Whether this handler applies to the rule's shape
    fn matches(&self, rule: &Rule) -> bool;

    /// Validate the rule against a document.
    ///
    /// Returns one message per violation; an empty vector means the rule
    /// holds. Only called for rules where [`matches`](Self::matches) is true.
    fn validate(&self, document: &dyn Document, rule: &Rule) -> Result<Vec<String>, SelectorError>;
}
