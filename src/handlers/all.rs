//! `all` rules: every matched element carries the listed attributes

use crate::document::{Document, SelectorError};
use crate::handler::RuleHandler;
use crate::rule::Rule;

/// Handler for rules with an `all` payload
#[derive(Debug, Clone, Copy, Default)]
pub struct AllHandler;

impl RuleHandler for AllHandler {
    fn id(&self) -> &str {
        "all"
    }

    fn description(&self) -> &str {
        "Every matched element has all of the listed attributes"
    }

    fn matches(&self, rule: &Rule) -> bool {
        rule.selector().is_some() && rule.all.is_some()
    }

    fn validate(&self, document: &dyn Document, rule: &Rule) -> Result<Vec<String>, SelectorError> {
        let (Some(selector), Some(conditions)) = (rule.selector(), &rule.all) else {
            return Ok(Vec::new());
        };

        let diff = document
            .select(selector)?
            .iter()
            .filter(|e| !conditions.is_satisfied_by(e.as_ref()))
            .count();

        if diff == 0 {
            return Ok(Vec::new());
        }

        let keys: Vec<&str> = conditions.keys().collect();
        Ok(vec![format!(
            "There {} {} <{}> tag without {} attribute",
            if diff > 1 { "are" } else { "is" },
            diff,
            rule.display_name(),
            keys.join(", ")
        )])
    }
}
