// src/crawl/fetch.rs
// =============================================================================
// Fetches one page and returns the links it points to.
//
// Failure policy:
// - A dead page (DNS error, refused connection, 404, 500, timeout, ...)
//   must not stop the crawl. It just contributes no links.
// - So fetch_links never returns an error; failures are logged at debug
//   level and turned into an empty Vec.
//
// Link resolution (kept deliberately simple):
// - "/about"              -> resolved against the crawl root's scheme+host
// - "https://..."         -> passed through unchanged
// - anything else         -> dropped (mailto:, javascript:, "page.html",
//                            "../up", "#top", ...)
// Bare relative links are a known limitation, not something to resolve
// against the current page.
//
// Rust concepts:
// - Traits: PageFetcher lets the crawler run against a fake in tests
// - async-trait: async fns inside traits
// - From impls: let ? convert reqwest errors into our FetchError
// =============================================================================

use super::normalize::{CrawlRoot, NormalizedUrl};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::links::{parse_links, Link};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Anything that can turn a URL into the raw hrefs found on that page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    // Returns absolute link strings found on `url`. Never fails: an
    // unreachable page yields an empty Vec.
    async fn fetch_links(&self, url: &NormalizedUrl, root: &CrawlRoot) -> Vec<String>;
}

/// Why a single page could not be read. Never leaves this module.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(error)
        }
    }
}

/// The real fetcher: HTTP GET through a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a client with the crawl's timeout and user agent.
    // The client is reused for every request (connection pooling).
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_links(&self, url: &NormalizedUrl, root: &CrawlRoot) -> Vec<String> {
        match self.fetch_page(url.as_str()).await {
            Ok(body) => {
                let hrefs = links_from_body(&body, root);
                debug!(url = %url, links = hrefs.len(), "fetched page");
                hrefs
            }
            Err(error) => {
                debug!(url = %url, error = %error, "skipping page that could not be fetched");
                Vec::new()
            }
        }
    }
}

// Parses a page body and resolves its hrefs (see the rules at the top)
pub(crate) fn links_from_body(body: &str, root: &CrawlRoot) -> Vec<String> {
    resolve_hrefs(&parse_links(body), root)
}

fn resolve_hrefs(links: &[Link], root: &CrawlRoot) -> Vec<String> {
    links
        .iter()
        .filter_map(|link| {
            let href = link.href.trim();
            if href.starts_with('/') {
                root.join(href).map(String::from)
            } else if href.starts_with("http") {
                Some(href.to_string())
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::normalize::normalize;
    use crate::crawl::testing::{serve, serve_hanging, test_client};
    use std::time::Duration;

    fn link(href: &str) -> Link {
        Link {
            href: href.to_string(),
            text: String::new(),
        }
    }

    #[test]
    fn test_resolve_root_relative_link() {
        let root = CrawlRoot::parse("https://example.com/blog").unwrap();
        let hrefs = resolve_hrefs(&[link("/about"), link("  /contact  ")], &root);
        assert_eq!(hrefs, vec!["https://example.com/about", "https://example.com/contact"]);
    }

    #[test]
    fn test_absolute_links_pass_through() {
        let root = CrawlRoot::parse("example.com").unwrap();
        let hrefs = resolve_hrefs(
            &[link("https://external.com/page"), link("http://example.com/x?y=1")],
            &root,
        );
        assert_eq!(hrefs, vec!["https://external.com/page", "http://example.com/x?y=1"]);
    }

    #[test]
    fn test_other_forms_are_dropped() {
        let root = CrawlRoot::parse("example.com").unwrap();
        let hrefs = resolve_hrefs(
            &[
                link("mailto:admin@example.com"),
                link("javascript:void(0)"),
                link("page.html"),
                link("../up"),
                link("#top"),
                link("tel:+123"),
            ],
            &root,
        );
        assert!(hrefs.is_empty());
    }

    #[test]
    fn test_links_from_body() {
        let root = CrawlRoot::parse("example.com").unwrap();
        let body = r#"<a href="/about">About</a><a href="mailto:x@example.com">Mail</a>"#;
        assert_eq!(links_from_body(body, &root), vec!["https://example.com/about"]);
    }

    #[tokio::test]
    async fn test_fetch_links_from_live_server() {
        let addr = serve(vec![(
            "/",
            200,
            r#"<a href="/about">About</a> <a href="https://external.com/">Ext</a>"#,
        )])
        .await;
        let root = CrawlRoot::parse(&format!("http://{}", addr)).unwrap();
        let fetcher = HttpFetcher::with_client(test_client(Duration::from_secs(5)));

        let hrefs = fetcher.fetch_links(root.start(), &root).await;

        assert_eq!(
            hrefs,
            vec![format!("http://{}/about", addr), "https://external.com/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_error_status_yields_no_links() {
        let addr = serve(vec![("/gone", 404, r#"<a href="/about">About</a>"#)]).await;
        let root = CrawlRoot::parse(&format!("http://{}", addr)).unwrap();
        let fetcher = HttpFetcher::with_client(test_client(Duration::from_secs(5)));

        let url = normalize(&format!("http://{}/gone", addr)).unwrap();
        assert!(fetcher.fetch_links(&url, &root).await.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_yields_no_links() {
        let addr = serve_hanging().await;
        let root = CrawlRoot::parse(&format!("http://{}", addr)).unwrap();
        let fetcher = HttpFetcher::with_client(test_client(Duration::from_millis(200)));

        assert!(fetcher.fetch_links(root.start(), &root).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_no_links() {
        // Port 9 (discard) on localhost is closed on a typical test machine
        let root = CrawlRoot::parse("http://127.0.0.1:9").unwrap();
        let fetcher = HttpFetcher::with_client(test_client(Duration::from_secs(2)));

        assert!(fetcher.fetch_links(root.start(), &root).await.is_empty());
    }

    #[test]
    fn test_new_builds_client_from_config() {
        assert!(HttpFetcher::new(&CrawlConfig::default()).is_ok());
    }
}
