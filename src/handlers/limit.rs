//! `limit` rules: bounds on the number of matched elements

use crate::document::{Document, SelectorError};
use crate::handler::RuleHandler;
use crate::rule::Rule;

/// Handler for rules with a `limit` payload
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitHandler;

impl RuleHandler for LimitHandler {
    fn id(&self) -> &str {
        "limit"
    }

    fn description(&self) -> &str {
        "The number of matched elements stays within [min, max]"
    }

    fn matches(&self, rule: &Rule) -> bool {
        rule.selector().is_some() && rule.limit.is_some()
    }

    fn validate(&self, document: &dyn Document, rule: &Rule) -> Result<Vec<String>, SelectorError> {
        let (Some(selector), Some(limit)) = (rule.selector(), rule.limit) else {
            return Ok(Vec::new());
        };

        let count = document.count(selector)?;
        let name = rule.display_name();
        let mut messages = Vec::new();

        // Bounds are checked independently; inverted bounds can trip both
        if limit.min > 0 && count < limit.min {
            messages.push(format!("This HTML has less than {} <{}> tag", limit.min, name));
        }
        if limit.max > 0 && count > limit.max {
            messages.push(format!("This HTML has more than {} <{}> tag", limit.max, name));
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::rule::Limit;

    fn strongs(n: usize) -> HtmlDocument {
        HtmlDocument::parse(&"<strong>x</strong>".repeat(n))
    }

    #[test]
    fn test_more_than_max() {
        let rule = Rule::new("strong").with_limit(Limit::at_most(3));
        assert_eq!(
            LimitHandler.validate(&strongs(4), &rule).unwrap(),
            vec!["This HTML has more than 3 <strong> tag"]
        );
        assert!(LimitHandler.validate(&strongs(3), &rule).unwrap().is_empty());
    }

    #[test]
    fn test_less_than_min() {
        let rule = Rule::new("head title").with_limit(Limit::at_least(1));
        let doc = HtmlDocument::parse("<html><head></head><body></body></html>");
        assert_eq!(
            LimitHandler.validate(&doc, &rule).unwrap(),
            vec!["This HTML has less than 1 <title> tag"]
        );
    }

    #[test]
    fn test_zero_bounds_never_report() {
        let rule = Rule::new("strong").with_limit(Limit::new(0, 0));
        for n in [0, 1, 10] {
            assert!(LimitHandler.validate(&strongs(n), &rule).unwrap().is_empty());
        }
    }

    #[test]
    fn test_inverted_bounds_report_both() {
        let rule = Rule::new("strong").with_limit(Limit::new(5, 2));
        assert_eq!(
            LimitHandler.validate(&strongs(3), &rule).unwrap(),
            vec![
                "This HTML has less than 5 <strong> tag",
                "This HTML has more than 2 <strong> tag"
            ]
        );
    }

    #[test]
    fn test_within_bounds() {
        let rule = Rule::new("strong").with_limit(Limit::new(1, 3));
        assert!(LimitHandler.validate(&strongs(2), &rule).unwrap().is_empty());
    }
}
