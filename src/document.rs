//! Document query adapter over the HTML parser

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// A rule selector that the query engine rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid selector '{selector}': {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

/// An element returned by a selector query
pub trait Element {
    /// Element name (e.g., "img", "meta")
    fn name(&self) -> &str;

    /// Get attribute value
    fn attr(&self, name: &str) -> Option<&str>;
}

/// A parsed, read-only document
pub trait Document {
    /// All elements matching a CSS selector, in document order
    fn select(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, SelectorError>;

    /// Number of elements matching a CSS selector
    fn count(&self, selector: &str) -> Result<usize, SelectorError> {
        Ok(self.select(selector)?.len())
    }
}

/// HTML document backed by `scraper`
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }
}

struct HtmlElement<'a>(ElementRef<'a>);

impl Element for HtmlElement<'_> {
    fn name(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }
}

impl Document for HtmlDocument {
    fn select(&self, selector: &str) -> Result<Vec<Box<dyn Element + '_>>, SelectorError> {
        let parsed = Selector::parse(selector).map_err(|e| SelectorError {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        Ok(self
            .html
            .select(&parsed)
            .map(|e| Box::new(HtmlElement(e)) as Box<dyn Element + '_>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
<head><title>Home</title><meta name="description" content="x"></head>
<body><img src="a.png" alt=""><img src="b.png" alt="logo"><a href="/">home</a></body>
</html>"#;

    #[test]
    fn test_select_in_document_order() {
        let doc = HtmlDocument::parse(PAGE);
        let imgs = doc.select("img").unwrap();
        assert_eq!(imgs.len(), 2);
        assert_eq!(imgs[0].name(), "img");
        assert_eq!(imgs[0].attr("src"), Some("a.png"));
        assert_eq!(imgs[1].attr("alt"), Some("logo"));
    }

    #[test]
    fn test_attr_missing_and_empty() {
        let doc = HtmlDocument::parse(PAGE);
        let imgs = doc.select("img").unwrap();
        assert_eq!(imgs[0].attr("alt"), Some(""));
        assert_eq!(imgs[0].attr("title"), None);
    }

    #[test]
    fn test_compound_selector() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.count("head title").unwrap(), 1);
        assert_eq!(doc.count("body title").unwrap(), 0);
        assert_eq!(doc.count("head meta").unwrap(), 1);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = HtmlDocument::parse(PAGE);
        let err = doc.select("img[").err().unwrap();
        assert_eq!(err.selector, "img[");
        assert!(err.to_string().starts_with("Invalid selector 'img['"));
    }

    #[test]
    fn test_parser_completes_missing_head() {
        // html5ever synthesizes <head> and <body> around fragments
        let doc = HtmlDocument::parse("<strong>a</strong>");
        assert_eq!(doc.count("head").unwrap(), 1);
        assert_eq!(doc.count("body strong").unwrap(), 1);
    }
}
