// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing) on stderr
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because page fetches are network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - crawl settings
mod crawl;         // src/crawl/ - the breadth-first crawler
mod error;         // src/error.rs - typed errors
mod links;         // src/links/ - HTML link extraction
mod sitemap;       // src/sitemap/ - sitemap.xml writer

use clap::Parser;  // Parser trait enables the parse() method
use cli::{Cli, Commands};
use crawl::{crawl_website, CrawlReport, CrawlRoot, HttpFetcher};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain: "outer: inner: cause"
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays machine-readable.
// RUST_LOG overrides the default level, e.g. RUST_LOG=sitemap_builder=debug
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            site,
            depth,
            output,
            exclude,
            no_default_excludes,
            timeout,
            concurrency,
            json,
        } => {
            let config =
                cli::crawl_config(depth, &exclude, no_default_excludes, timeout, concurrency);
            handle_crawl(&site, config, &output, json).await
        }
        Commands::Links { file, json } => handle_links(&file, json),
    }
}

// Handles the 'crawl' subcommand
// Parameters:
//   site: domain or URL given by the user
//   config: crawl settings built from the flags
//   output: where sitemap.xml goes
//   json: whether to print the URLs as JSON
async fn handle_crawl(
    site: &str,
    config: config::CrawlConfig,
    output: &Path,
    json: bool,
) -> Result<i32> {
    // Everything that can be wrong with the input is checked before the
    // first request goes out
    let root = CrawlRoot::parse(site)?;
    config.validate()?;
    let fetcher = HttpFetcher::new(&config)?;

    // The first Ctrl-C abandons the level in flight and the pages found so
    // far still end up in the sitemap. A second one exits immediately.
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        on_ctrl_c.cancel();
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted again, exiting without a sitemap");
            std::process::exit(130);
        }
    });

    let report = crawl_website(&root, &config, &fetcher, &cancel).await;
    let urls = report.sorted_urls();

    sitemap::write_sitemap(&urls, output)
        .with_context(|| format!("Failed to build sitemap for {}", root))?;

    if json {
        print_json_report(&root, &report, &urls, output)?;
    } else {
        print_summary(&root, &report, output);
    }

    Ok(0)
}

// Handles the 'links' subcommand: parse a local HTML file and list its links
fn handle_links(file: &Path, json: bool) -> Result<i32> {
    let reader = File::open(file)
        .with_context(|| format!("Could not open file '{}'", file.display()))?;
    let links = links::parse_links_from_reader(reader)
        .with_context(|| format!("Could not read file '{}'", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(0);
    }

    println!("Extracted links from '{}':", file.display());
    println!("{:<50} {:<40}", "HREF", "TEXT");
    println!("{}", "=".repeat(90));
    for link in &links {
        println!("{:<50} {:<40}", truncate(&link.href, 50), truncate(&link.text, 40));
    }
    println!();
    println!("📋 Total: {}", links.len());

    Ok(0)
}

fn print_json_report(root: &CrawlRoot, report: &CrawlReport, urls: &[String], output: &Path) -> Result<()> {
    let value = serde_json::json!({
        "root": root.to_string(),
        "output": output.display().to_string(),
        "levels": report.levels,
        "cancelled": report.cancelled,
        "urls": urls,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_summary(root: &CrawlRoot, report: &CrawlReport, output: &Path) {
    println!();
    println!("📊 Summary for {}:", root);
    println!("   📄 Pages: {}", report.visited.len());
    println!("   🔁 Levels crawled: {}", report.levels);
    if report.cancelled {
        println!("   ⚠️  Crawl was cancelled, the sitemap is partial");
    }
    println!("   💾 Sitemap written to {}", output.display());
}

// Shortens a string for table display, respecting char boundaries
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
