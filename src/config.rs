// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Everything that tunes a crawl lives in one struct that is built once
// (from the command line in main.rs) and then passed by reference into the
// crawler. Nothing reads global state.
// =============================================================================

use crate::error::CrawlError;
use std::time::Duration;

/// Path pattern skipped by default: paginated WordPress comment threads.
pub const DEFAULT_EXCLUDE_PATTERN: &str = "comment-page-";

/// Default number of link hops followed from the root.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest level processed (0 = only the root page)
    pub max_depth: usize,
    /// Any URL whose path contains one of these substrings is not enqueued
    pub exclude_patterns: Vec<String>,
    /// Upper bound for a single page fetch
    pub timeout: Duration,
    /// How many fetches of the same level may be in flight (1 = sequential)
    pub concurrency: usize,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_patterns: vec![DEFAULT_EXCLUDE_PATTERN.to_string()],
            timeout: DEFAULT_TIMEOUT,
            concurrency: 1,
            user_agent: format!("sitemap-builder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    // Rejects values that would make the crawl hang or do nothing.
    // Returning an error (instead of panicking later) lets main.rs report
    // it like any other bad input.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.exclude_patterns.iter().any(|p| p.is_empty()) {
            // An empty pattern is contained in every path and would exclude
            // the whole site except the root
            return Err(CrawlError::InvalidConfig(
                "exclude patterns must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
