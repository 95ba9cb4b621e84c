//! Built-in rule handlers

mod all;
mod contain;
mod limit;

pub use all::AllHandler;
pub use contain::ContainHandler;
pub use limit::LimitHandler;

use crate::handler::RuleHandler;
use std::sync::Arc;

/// The built-in handlers in evaluation order: all, contain, limit
pub fn default_handlers() -> Vec<Arc<dyn RuleHandler>> {
    vec![
        Arc::new(AllHandler),
        Arc::new(ContainHandler),
        Arc::new(LimitHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_handler_order() {
        let ids: Vec<String> = default_handlers().iter().map(|h| h.id().to_string()).collect();
        assert_eq!(ids, vec!["all", "contain", "limit"]);
    }
}
