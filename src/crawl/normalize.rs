// src/crawl/normalize.rs
// =============================================================================
// URL normalization and crawl-root validation.
//
// Two links that point at the same page should end up as the same string,
// otherwise the crawler would fetch the page twice and list it twice in
// the sitemap. We canonicalize by:
// - Dropping the #fragment
// - Dropping the ?query string
// - Dropping trailing slashes from the path (/about/ == /about)
//
// The url crate already lowercases the scheme and host of http(s) URLs and
// removes default ports, so those come for free.
//
// Rust concepts:
// - Newtype pattern: NormalizedUrl wraps Url so the type system tells us
//   which URLs have already been cleaned up
// - Manual trait impls: equality and hashing use only the canonical string
// =============================================================================

use crate::error::CrawlError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// A URL with fragment, query and trailing slash removed.
///
/// Equality, ordering and hashing all go through the canonical string, so a
/// `HashSet<NormalizedUrl>` deduplicates exactly the way the sitemap needs.
#[derive(Debug, Clone)]
pub struct NormalizedUrl {
    url: Url,
    canonical: String,
}

impl NormalizedUrl {
    fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);
        url.set_query(None);

        let path = url.path();
        let trimmed = path.trim_end_matches('/');
        if trimmed.len() != path.len() {
            let trimmed = trimmed.to_string();
            // For http(s) an empty path is stored as "/" again by the url
            // crate, which the canonical string below takes care of
            url.set_path(&trimmed);
        }

        let mut canonical = url.as_str().to_string();
        if url.has_host() && url.path() == "/" {
            canonical.pop();
        }

        Self { url, canonical }
    }

    /// The canonical string form, e.g. `https://example.com/about`
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The parsed form, for inspecting scheme/host/path
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for NormalizedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for NormalizedUrl {}

impl Hash for NormalizedUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for NormalizedUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

// Normalizes a raw (absolute) URL string
//
// Returns: the canonical URL, or CrawlError::MalformedUrl if `raw` does not
// parse. Calling it again on its own output gives the same result.
//
// Example:
//   "https://example.com/about/?page=2#team" -> "https://example.com/about"
pub fn normalize(raw: &str) -> Result<NormalizedUrl, CrawlError> {
    let url = Url::parse(raw.trim()).map_err(|source| CrawlError::MalformedUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(NormalizedUrl::from_url(url))
}

/// The validated starting point of a crawl. Read-only once built.
#[derive(Debug, Clone)]
pub struct CrawlRoot {
    start: NormalizedUrl,
}

impl CrawlRoot {
    // Parses and validates the domain given on the command line
    //
    // - "example.com" becomes "https://example.com" (https is assumed when
    //   no http:// or https:// prefix is present)
    // - The host must be non-empty and contain at least one '.'
    //   ("localhost" is rejected)
    pub fn parse(domain: &str) -> Result<Self, CrawlError> {
        let domain = domain.trim();
        let invalid = |reason: &str| CrawlError::InvalidRoot {
            domain: domain.to_string(),
            reason: reason.to_string(),
        };

        if domain.is_empty() {
            return Err(invalid("no domain provided"));
        }

        let lower = domain.to_ascii_lowercase();
        let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };

        let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

        match url.host_str() {
            None | Some("") => return Err(invalid("URL has no host")),
            Some(host) if !host.contains('.') => {
                return Err(invalid("host has no top-level domain"))
            }
            Some(_) => {}
        }

        Ok(Self {
            start: NormalizedUrl::from_url(url),
        })
    }

    /// The normalized root URL; the first member of level 0
    pub fn start(&self) -> &NormalizedUrl {
        &self.start
    }

    /// Lowercased host every crawled URL must share
    pub fn host(&self) -> &str {
        // parse() guarantees a host is present
        self.start.url().host_str().unwrap_or_default()
    }

    /// Explicit non-default port of the root, if any
    pub fn port(&self) -> Option<u16> {
        self.start.url().port()
    }

    // Resolves a root-relative href ("/about") against the root's
    // scheme and host. Returns None if the result is not a valid URL.
    pub fn join(&self, href: &str) -> Option<Url> {
        self.start.url().join(href).ok()
    }
}

impl fmt::Display for CrawlRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.start.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fragment_query_and_trailing_slash() {
        let url = normalize("https://example.com/about/?page=2#team").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_bare_host_has_no_trailing_slash() {
        assert_eq!(normalize("https://example.com/").unwrap().as_str(), "https://example.com");
        assert_eq!(normalize("https://example.com").unwrap().as_str(), "https://example.com");
    }

    #[test]
    fn test_lowercases_scheme_and_host_only() {
        let url = normalize("HTTPS://Example.COM/About").unwrap();
        assert_eq!(url.as_str(), "https://example.com/About");
    }

    #[test]
    fn test_keeps_interior_slashes() {
        let url = normalize("https://example.com/a//b/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a//b");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "https://example.com",
            "https://example.com/",
            "https://example.com/page/",
            "https://example.com/page//",
            "http://example.com:8080/x/y/?a=b#c",
            "https://example.com/a%20b/",
            "mailto:admin@example.com",
        ];
        for raw in inputs {
            let once = normalize(raw).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", raw);
            assert_eq!(once.as_str(), twice.as_str());
        }
    }

    #[test]
    fn test_trailing_slash_variants_are_equal() {
        let a = normalize("https://example.com/page/").unwrap();
        let b = normalize("https://example.com/page").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_url_is_an_error() {
        let err = normalize("not a url").unwrap_err();
        assert!(matches!(err, CrawlError::MalformedUrl { .. }));
        assert!(normalize("/relative/path").is_err());
    }

    #[test]
    fn test_root_validation() {
        // (input, expected root or None for an error)
        let cases = [
            ("http://example.com", Some("http://example.com")),
            ("https://example.com", Some("https://example.com")),
            ("example.com", Some("https://example.com")),
            ("sub.example.com", Some("https://sub.example.com")),
            ("https://Example.com/Blog/", Some("https://example.com/Blog")),
            ("http://", None),
            ("https://", None),
            ("http://localhost", None),
            ("this is not a url", None),
            ("", None),
        ];
        for (input, expected) in cases {
            let result = CrawlRoot::parse(input);
            match expected {
                Some(root) => assert_eq!(result.unwrap().to_string(), root, "input {:?}", input),
                None => assert!(
                    matches!(result, Err(CrawlError::InvalidRoot { .. })),
                    "input {:?} should be rejected",
                    input
                ),
            }
        }
    }

    #[test]
    fn test_root_host_and_join() {
        let root = CrawlRoot::parse("https://example.com/blog").unwrap();
        assert_eq!(root.host(), "example.com");
        assert_eq!(root.port(), None);
        assert_eq!(root.join("/about").unwrap().as_str(), "https://example.com/about");
    }
}
