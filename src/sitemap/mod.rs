// src/sitemap/mod.rs
// =============================================================================
// This module turns the set of crawled URLs into sitemap.xml.
//
// Submodules:
// - xml: builds the document with quick-xml and writes it to disk
// =============================================================================

mod xml;

pub use xml::{write_sitemap, DEFAULT_OUTPUT_FILE};
