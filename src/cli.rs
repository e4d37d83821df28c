// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::config::{CrawlConfig, DEFAULT_EXCLUDE_PATTERN, DEFAULT_MAX_DEPTH};
use crate::sitemap::DEFAULT_OUTPUT_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "sitemap-builder",
    version,
    about = "Crawl a website breadth-first and write its sitemap.xml",
    long_about = "sitemap-builder follows every same-domain link of a website, level by level, \
                  up to a maximum depth, and writes the pages it found as a sitemaps.org XML file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and write sitemap.xml
    ///
    /// Example: sitemap-builder crawl example.com --depth 3
    Crawl {
        /// Domain or URL to crawl (e.g., example.com or https://example.com)
        ///
        /// https:// is assumed when no scheme is given
        site: String,

        /// Maximum crawl depth
        ///
        /// Depth 0 = just the starting page
        /// Depth 1 = starting page + all pages it links to
        /// etc.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,

        /// Where to write the sitemap
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Skip URLs whose path contains this text (repeatable)
        ///
        /// "comment-page-" is always included unless --no-default-excludes
        /// is given
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,

        /// Don't skip "comment-page-" URLs by default
        #[arg(long)]
        no_default_excludes: bool,

        /// Per-request timeout in seconds
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        timeout: u64,

        /// How many pages of the same level to fetch at once
        #[arg(long, value_name = "N", default_value_t = 1)]
        concurrency: usize,

        /// Print the crawled URLs as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print every link found in a local HTML file
    ///
    /// Example: sitemap-builder links index.html
    Links {
        /// HTML file to parse
        file: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

// Turns the crawl flags into a CrawlConfig
//
// Kept separate from main.rs so the flag -> config mapping can be tested
// without running a crawl.
pub fn crawl_config(
    depth: usize,
    exclude: &[String],
    no_default_excludes: bool,
    timeout: u64,
    concurrency: usize,
) -> CrawlConfig {
    let mut patterns = Vec::new();
    if !no_default_excludes {
        patterns.push(DEFAULT_EXCLUDE_PATTERN.to_string());
    }
    for pattern in exclude {
        if !patterns.contains(pattern) {
            patterns.push(pattern.clone());
        }
    }

    CrawlConfig::default()
        .with_max_depth(depth)
        .with_exclude_patterns(patterns)
        .with_timeout(Duration::from_secs(timeout))
        .with_concurrency(concurrency)
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is depth a usize?
//    - usize is unsigned, so clap rejects "--depth -1" for us
//    - No extra validation code needed for negative depths
//
// 2. What is Vec<String> for --exclude?
//    - clap collects every occurrence of a repeated flag into the Vec
//    - --exclude /tag/ --exclude /feed -> vec!["/tag/", "/feed"]
//
// 3. What is try_parse_from?
//    - Like parse(), but takes the arguments explicitly and returns a
//      Result instead of exiting the process
//    - Perfect for tests
// -----------------------------------------------------------------------------
