// src/crawl/testing.rs
// =============================================================================
// Test helpers shared by the crawl tests:
// - FakeFetcher: serves HTML from memory and records every fetch
// - serve / serve_hanging: tiny HTTP servers on 127.0.0.1 so the real
//   HttpFetcher can be tested without internet access
// =============================================================================

use super::fetch::{links_from_body, PageFetcher};
use super::normalize::{CrawlRoot, NormalizedUrl};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// In-memory site: canonical URL -> HTML body.
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    log: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Every URL fetched so far, in call order
    pub fn fetch_log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_links(&self, url: &NormalizedUrl, root: &CrawlRoot) -> Vec<String> {
        self.log.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(body) => links_from_body(body, root),
            None => Vec::new(),
        }
    }
}

/// A client that ignores proxy environment variables.
pub fn test_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .unwrap()
}

/// Starts an HTTP server answering `(path, status, body)` routes; any
/// other path gets a 404.
pub async fn serve(routes: Vec<(&str, u16, &str)>) -> SocketAddr {
    let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
            .collect(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));
                let response = format!(
                    "HTTP/1.1 {} Test\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Starts a server that accepts connections and never answers.
pub async fn serve_hanging() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            // Keep the socket alive so the client waits for a response
            open.push(socket);
        }
    });

    addr
}
