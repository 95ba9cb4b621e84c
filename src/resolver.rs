//! Binding of one rule to the handlers that claim it

use crate::diagnostic::Diagnostic;
use crate::document::{Document, SelectorError};
use crate::handler::RuleHandler;
use crate::rule::Rule;
use std::sync::Arc;

/// A rule paired with its matching handlers, in registration order
pub struct RuleResolver<'a> {
    rule: &'a Rule,
    handlers: Vec<&'a dyn RuleHandler>,
}

impl<'a> RuleResolver<'a> {
    /// Keep the handlers whose `matches` accepts the rule
    pub fn new(rule: &'a Rule, handlers: &'a [Arc<dyn RuleHandler>]) -> Self {
        let handlers = handlers
            .iter()
            .map(|h| h.as_ref())
            .filter(|h| h.matches(rule))
            .collect();
        Self { rule, handlers }
    }

    pub fn rule(&self) -> &Rule {
        self.rule
    }

    /// IDs of the matched handlers
    pub fn handler_ids(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.id()).collect()
    }

    /// True when no handler claimed the rule
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every matched handler and collect its diagnostics in order
    pub fn validate(
        &self,
        document: &dyn Document,
        rule_index: usize,
    ) -> Result<Vec<Diagnostic>, SelectorError> {
        let tag = self.rule.tag.as_deref().unwrap_or_default();
        let mut diagnostics = Vec::new();

        for handler in &self.handlers {
            let messages = handler.validate(document, self.rule)?;
            log::debug!(
                "Rule #{} ({}) handler '{}': {} violation(s)",
                rule_index,
                tag,
                handler.id(),
                messages.len()
            );
            diagnostics.extend(
                messages
                    .iter()
                    .map(|m| Diagnostic::new(rule_index, tag, handler.id(), m)),
            );
        }

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::handlers::default_handlers;
    use crate::rule::{Conditions, Limit};

    #[test]
    fn test_rule_without_shape_matches_nothing() {
        let handlers = default_handlers();
        let rule = Rule::new("img");
        let resolver = RuleResolver::new(&rule, &handlers);
        assert!(resolver.is_empty());

        let doc = HtmlDocument::parse("<img>");
        assert!(resolver.validate(&doc, 0).unwrap().is_empty());
    }

    #[test]
    fn test_multiple_shapes_keep_handler_order() {
        let handlers = default_handlers();
        let rule = Rule::new("img")
            .with_limit(Limit::at_most(1))
            .with_all(Conditions::new().with("alt", "*"));
        let resolver = RuleResolver::new(&rule, &handlers);
        assert_eq!(resolver.handler_ids(), vec!["all", "limit"]);

        let doc = HtmlDocument::parse("<img><img>");
        let diagnostics = resolver.validate(&doc, 3).unwrap();
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "There are 2 <img> tag without alt attribute",
                "This HTML has more than 1 <img> tag"
            ]
        );
        assert_eq!(diagnostics[0].handler, "all");
        assert_eq!(diagnostics[1].handler, "limit");
        assert!(diagnostics.iter().all(|d| d.rule_index == 3 && d.tag == "img"));
    }

    #[test]
    fn test_custom_handler_list() {
        let handlers = default_handlers()[2..].to_vec();
        let rule = Rule::new("img")
            .with_all(Conditions::new().with("alt", "*"))
            .with_limit(Limit::at_most(5));
        let resolver = RuleResolver::new(&rule, &handlers);
        assert_eq!(resolver.handler_ids(), vec!["limit"]);
    }

    #[test]
    fn test_selector_error_propagates() {
        let handlers = default_handlers();
        let rule = Rule::new("img[").with_limit(Limit::at_least(1));
        let resolver = RuleResolver::new(&rule, &handlers);
        let doc = HtmlDocument::parse("<img>");
        assert!(resolver.validate(&doc, 0).is_err());
    }
}
