// src/crawl/frontier.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Level 0 holds just the root URL
// 2. Every URL of the current level that we have not visited yet is marked
//    visited and fetched
// 3. Links found on those pages are normalized and filtered (same host,
//    no mailto:, no excluded patterns) into the next level
// 4. The next level becomes the current level
// 5. Stop when a level is empty or after level max_depth
//
// Why levels instead of a single queue?
// - Depth is a property of a whole level, so there is no per-URL depth
//   bookkeeping
// - The fetches of one level don't depend on each other, so they can run
//   concurrently; collecting all of them before building the next level
//   acts as a barrier between levels
//
// Dedup guarantee:
// - A URL is inserted into `visited` *before* its fetch starts, and only
//   the single scheduler task touches `visited` and `next`. So no URL is
//   ever fetched twice, even with concurrency > 1.
//
// Rust concepts:
// - HashSet: To track visited URLs and to build each level
// - Streams: buffer_unordered runs up to N fetches at once
// - CancellationToken: lets Ctrl-C stop the crawl, either between levels or
//   in the middle of one (the fetches still in flight are dropped)
// =============================================================================

use super::fetch::PageFetcher;
use super::normalize::{normalize, CrawlRoot, NormalizedUrl};
use super::policy::OriginPolicy;
use crate::config::CrawlConfig;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// What a finished (or cancelled) crawl found.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Every URL that was fetched, each exactly once
    pub visited: HashSet<NormalizedUrl>,
    /// Number of levels that were processed
    pub levels: usize,
    /// True if the crawl stopped early because of the cancellation token
    pub cancelled: bool,
}

impl CrawlReport {
    /// Visited URLs as strings, sorted so output files are reproducible
    pub fn sorted_urls(&self) -> Vec<String> {
        let mut urls: Vec<&NormalizedUrl> = self.visited.iter().collect();
        urls.sort();
        urls.into_iter().map(|url| url.to_string()).collect()
    }
}

// Crawls a website starting from the root
//
// Parameters:
//   root: the validated starting URL (defines the allowed host)
//   config: depth limit, exclude patterns, concurrency
//   fetcher: where pages come from (HttpFetcher, or a fake in tests)
//   cancel: checked at the start of every level and raced against the
//           fetches of the running one
//
// Returns: CrawlReport with the visited set
//
// Example:
//   max_depth=0: Only fetch the root page
//   max_depth=1: Root page + all eligible pages it links to
//   max_depth=2: ... + all eligible pages those link to
pub async fn crawl_website<F>(
    root: &CrawlRoot,
    config: &CrawlConfig,
    fetcher: &F,
    cancel: &CancellationToken,
) -> CrawlReport
where
    F: PageFetcher + ?Sized,
{
    let policy = OriginPolicy::new(root, config);
    let concurrency = config.concurrency.max(1);

    let mut report = CrawlReport::default();
    let mut current: HashSet<NormalizedUrl> = HashSet::from([root.start().clone()]);

    info!(
        root = %root,
        max_depth = config.max_depth,
        concurrency,
        "starting crawl"
    );

    for level in 0..=config.max_depth {
        if current.is_empty() {
            break;
        }
        if cancel.is_cancelled() {
            warn!(level, visited = report.visited.len(), "crawl cancelled");
            report.cancelled = true;
            break;
        }

        // Mark first, fetch after
        let pending: Vec<NormalizedUrl> = current
            .into_iter()
            .filter(|url| report.visited.insert(url.clone()))
            .collect();

        report.levels += 1;
        info!(level, pages = pending.len(), "crawling level");

        let fetches = stream::iter(pending.iter())
            .map(|url| fetcher.fetch_links(url, root))
            .buffer_unordered(concurrency)
            .collect::<Vec<Vec<String>>>();

        // A stuck server must not keep Ctrl-C from ending the crawl
        let found = tokio::select! {
            found = fetches => found,
            _ = cancel.cancelled() => {
                warn!(level, visited = report.visited.len(), "crawl cancelled mid-level");
                report.cancelled = true;
                break;
            }
        };

        let mut next = HashSet::new();
        for href in found.into_iter().flatten() {
            match normalize(&href) {
                Ok(url) if report.visited.contains(&url) => {}
                Ok(url) if policy.is_eligible(&url) => {
                    next.insert(url);
                }
                Ok(url) => trace!(url = %url, "skipping link outside the crawl"),
                Err(error) => debug!(error = %error, "dropping malformed link"),
            }
        }

        current = next;
    }

    info!(
        pages = report.visited.len(),
        levels = report.levels,
        cancelled = report.cancelled,
        "crawl finished"
    );

    report
}
