//! Thin query facade over a parsed HTML document.

use scraper::{ElementRef, Html, Selector};

/// A parsed, read-only HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML string. Never fails; malformed markup is repaired by the parser.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Iterates elements matching `selector` in document order.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// First element matching `selector`.
    pub fn first<'a>(&'a self, selector: &'a Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }
}

/// Reads an attribute value from an element.
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Collects the rendered text content of an element.
pub fn text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Reads the inner markup of an element.
pub fn inner_markup(element: &ElementRef) -> String {
    element.inner_html()
}

/// Collapses every whitespace run to a single space and trims the result.
pub fn compact(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
