// src/crawl/policy.rs
// =============================================================================
// Decides which discovered URLs are allowed into the next crawl level.
//
// A URL is eligible when:
// 1. It is not a mailto: link
// 2. It has exactly the same scheme, host and port as the crawl root
// 3. It has no #fragment left
// 4. Its path contains none of the exclude patterns (by default
//    "comment-page-", which filters paginated WordPress comment threads)
//
// The policy only reads the root and the config; it never touches the
// network, so it is a plain synchronous predicate.
// =============================================================================

use super::normalize::{CrawlRoot, NormalizedUrl};
use crate::config::CrawlConfig;

/// Same-origin filter built once per crawl.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    scheme: String,
    host: String,
    port: Option<u16>,
    exclude_patterns: Vec<String>,
}

impl OriginPolicy {
    pub fn new(root: &CrawlRoot, config: &CrawlConfig) -> Self {
        Self {
            scheme: root.start().url().scheme().to_string(),
            host: root.host().to_ascii_lowercase(),
            port: root.port(),
            exclude_patterns: config.exclude_patterns.clone(),
        }
    }

    pub fn is_eligible(&self, url: &NormalizedUrl) -> bool {
        let url = url.url();

        if url.scheme() == "mailto" {
            return false;
        }

        // The url crate lowercases http(s) hosts, but other schemes keep
        // their case, so compare case-insensitively
        let same_host = url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&self.host));
        if url.scheme() != self.scheme || !same_host || url.port() != self.port {
            return false;
        }

        if url.fragment().is_some_and(|f| !f.is_empty()) {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|pattern| url.path().contains(pattern.as_str()))
    }
}
