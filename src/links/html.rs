// src/links/html.rs
// =============================================================================
// This module extracts hyperlinks from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which repairs broken HTML the way browsers do
//   (unclosed or nested <a> tags never make parsing fail)
//
// For every <a> element we report its href and its visible text. Anchors
// without an href are skipped, and an anchor that sits inside another
// anchor is folded into the outer one.
//
// Rust concepts:
// - Iterators: For walking the DOM and its text nodes
// - Closures: Anonymous functions (|x| ...)
// - Derive macros: Serialize lets us print links as JSON
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::io::Read;

/// One <a href="..."> element found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The href attribute, exactly as written (may be relative)
    pub href: String,
    /// The text inside the anchor, with whitespace collapsed
    pub text: String,
}

// Extracts all links from HTML content, in document order
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<Link>, empty if the document has no usable anchors
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   result = [Link { href: "/docs", text: "Docs" }]
pub fn parse_links(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);

    // Selector::parse only fails for invalid CSS; "a" is a constant
    let selector = Selector::parse("a").expect("'a' is a valid CSS selector");

    document
        .select(&selector)
        .filter(|anchor| !is_nested_anchor(anchor))
        .filter_map(build_link)
        .collect()
}

// Same as parse_links, but reads the document from a byte stream
// (a file, a socket, ...). Invalid UTF-8 is replaced rather than rejected.
pub fn parse_links_from_reader<R: Read>(mut reader: R) -> std::io::Result<Vec<Link>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse_links(&String::from_utf8_lossy(&bytes)))
}

// True if some ancestor of this anchor is also an <a> element
fn is_nested_anchor(anchor: &ElementRef) -> bool {
    anchor.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|element| element.name() == "a")
    })
}

// Builds a Link from an <a> element, or None if the href is missing/empty
fn build_link(anchor: ElementRef) -> Option<Link> {
    let href = anchor.value().attr("href")?;
    if href.is_empty() {
        return None;
    }

    Some(Link {
        href: href.to_string(),
        text: collapse_whitespace(anchor.text()),
    })
}

// Joins text nodes and squeezes runs of whitespace into single spaces
fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why select "a" and not "a[href]"?
//    - We need every anchor to decide which ones are nested
//    - Anchors without href are dropped afterwards in build_link
//
// 2. What does .ancestors() return?
//    - An iterator over the parent, grandparent, ... up to the document root
//    - .any() stops at the first ancestor that matches
//
// 3. What is filter_map?
//    - Runs a closure that returns Option<T>
//    - Keeps the Some values, drops the None values
//
// 4. What is from_utf8_lossy?
//    - Converts bytes to text, replacing invalid sequences with '�'
//    - Web pages in odd encodings still get parsed instead of failing
// -----------------------------------------------------------------------------
