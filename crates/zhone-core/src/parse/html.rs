// Small DOM helpers shared by the table-based parsers.

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

/// Compile a selector that is a compile-time constant.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// Text content of an element, trimmed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// First element matching `table`, or `PatternNotFound` naming `css`.
pub(crate) fn first<'a>(
    document: &'a Html,
    table: &Selector,
    css: &'static str,
) -> Result<ElementRef<'a>, ParseError> {
    document
        .select(table)
        .next()
        .ok_or_else(|| ParseError::not_found(css))
}
