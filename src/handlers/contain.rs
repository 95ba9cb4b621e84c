//! `contain` rules: at least one matched element carries the listed attributes

use crate::document::{Document, SelectorError};
use crate::handler::RuleHandler;
use crate::rule::Rule;

/// Handler for rules with a `contain` payload
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainHandler;

impl RuleHandler for ContainHandler {
    fn id(&self) -> &str {
        "contain"
    }

    fn description(&self) -> &str {
        "At least one matched element has all of the listed attributes"
    }

    fn matches(&self, rule: &Rule) -> bool {
        rule.selector().is_some() && rule.contain.is_some()
    }

    fn validate(&self, document: &dyn Document, rule: &Rule) -> Result<Vec<String>, SelectorError> {
        let (Some(selector), Some(conditions)) = (rule.selector(), &rule.contain) else {
            return Ok(Vec::new());
        };

        let found = document
            .select(selector)?
            .iter()
            .any(|e| conditions.is_satisfied_by(e.as_ref()));

        if found {
            return Ok(Vec::new());
        }

        let attrs: Vec<String> = conditions
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect();
        Ok(vec![format!(
            "This HTML doesn't have <{} {} ... />",
            rule.display_name(),
            attrs.join(" ")
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::rule::Conditions;

    fn meta_rule(name: &str) -> Rule {
        Rule::new("head meta").with_contain(Conditions::new().with("name", name))
    }

    #[test]
    fn test_matches_requires_tag_and_contain() {
        assert!(ContainHandler.matches(&meta_rule("description")));
        assert!(!ContainHandler.matches(&Rule::new("head meta")));
    }

    #[test]
    fn test_missing_element() {
        let doc = HtmlDocument::parse(r#"<head><meta name="keywords"></head>"#);
        let result = ContainHandler.validate(&doc, &meta_rule("description")).unwrap();
        assert_eq!(
            result,
            vec![r#"This HTML doesn't have <meta name="description" ... />"#]
        );
    }

    #[test]
    fn test_present_element() {
        let doc = HtmlDocument::parse(
            r#"<head><meta charset="utf-8"><meta name="description" content="x"></head>"#,
        );
        assert!(ContainHandler.validate(&doc, &meta_rule("description")).unwrap().is_empty());
    }

    #[test]
    fn test_conditions_must_hold_on_the_same_element() {
        let rule = Rule::new("head meta").with_contain(
            Conditions::new().with("name", "description").with("content", "*"),
        );
        let doc = HtmlDocument::parse(
            r#"<head><meta name="description"><meta name="other" content="x"></head>"#,
        );
        let result = ContainHandler.validate(&doc, &rule).unwrap();
        assert_eq!(
            result,
            vec![r#"This HTML doesn't have <meta name="description" content="*" ... />"#]
        );
    }

    #[test]
    fn test_meta_in_body_does_not_count() {
        let doc = HtmlDocument::parse(
            r#"<html><head></head><body><div><meta name="description"></div></body></html>"#,
        );
        assert_eq!(ContainHandler.validate(&doc, &meta_rule("description")).unwrap().len(), 1);
    }
}
