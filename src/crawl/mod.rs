// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - normalize: canonical URLs and validation of the starting domain
// - policy: which discovered URLs may be crawled (same host, no mailto:,
//   no excluded patterns)
// - fetch: downloads a page and returns its links, never failing the crawl
// - frontier: the breadth-first, level-by-level crawl loop
//
// The crawl root is passed explicitly to everything that needs it, so
// several crawls can run in the same process without interfering.
// =============================================================================

mod fetch;
mod frontier;
mod normalize;
mod policy;

#[cfg(test)]
mod testing;

pub use fetch::HttpFetcher;
pub use frontier::{crawl_website, CrawlReport};
pub use normalize::CrawlRoot;
