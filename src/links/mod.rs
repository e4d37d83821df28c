// src/links/mod.rs
// =============================================================================
// This module turns HTML documents into lists of hyperlinks.
//
// Submodules:
// - html: parses a page with scraper and returns (href, text) pairs
//
// The crawler uses it for every fetched page, and the `links` subcommand
// uses it directly on a local file.
// =============================================================================

mod html;

pub use html::{parse_links, parse_links_from_reader, Link};
