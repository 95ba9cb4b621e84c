//! Diagnostic types for check results

use serde::{Deserialize, Serialize};
use std::fmt;

/// One violated rule/handler combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the rule in the evaluated rule set (0-based)
    pub rule_index: usize,

    /// Selector of the rule that produced this diagnostic
    pub tag: String,

    /// Handler that produced this diagnostic (e.g., "all", "limit")
    pub handler: String,

    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn new(rule_index: usize, tag: &str, handler: &str, message: &str) -> Self {
        Self {
            rule_index,
            tag: tag.to_string(),
            handler: handler.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let diag = Diagnostic::new(2, "h1", "limit", "This HTML has more than 1 <h1> tag");
        assert_eq!(diag.to_string(), "This HTML has more than 1 <h1> tag");
        assert_eq!(diag.rule_index, 2);
    }
}
