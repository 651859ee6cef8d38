//! Permissive field lookup inside a parsed HTML node.
//!
//! A missing element or attribute is a normal outcome here, not an error: one
//! absent field must never abort extraction of the rest of the page.

use scraper::{ElementRef, Selector};

/// Returns the trimmed text of the first descendant matching `selector`, or
/// the value of `attribute` on it when an attribute name is given.
///
/// Yields `None` when nothing matches or the element lacks the attribute.
pub fn extract(node: ElementRef<'_>, selector: &Selector, attribute: Option<&str>) -> Option<String> {
    let element = node.select(selector).next()?;

    match attribute {
        Some(name) => element.value().attr(name).map(String::from),
        None => Some(text_of(element)),
    }
}

/// Returns the trimmed text of every descendant matching `selector`, in
/// document order. No match yields an empty list.
pub fn extract_list(node: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    node.select(selector).map(text_of).collect()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
