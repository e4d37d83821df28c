// src/error.rs
// =============================================================================
// Typed errors for the crawler and the sitemap writer.
//
// main.rs works with anyhow::Result, but the crawl and sitemap modules
// return these enums so callers can tell the failure kinds apart:
// - An invalid root stops everything before any network activity
// - A malformed discovered link is simply dropped
// - A sitemap write failure is reported after the crawl
//
// Fetch failures have their own enum in crawl/fetch.rs because they never
// leave the page fetcher.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or running a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The starting domain failed validation (no host, no dot in the host,
    /// or not parseable at all)
    #[error("invalid domain '{domain}': {reason}")]
    InvalidRoot { domain: String, reason: String },

    /// A URL string could not be parsed
    #[error("malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configuration value is out of range
    #[error("invalid crawl configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised while turning the visited set into a sitemap file.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The XML document could not be produced
    #[error("error generating XML: {0}")]
    Serialization(String),

    /// The document could not be written to disk
    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
