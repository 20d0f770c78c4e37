// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - crawl:   crawl a site and print/save the graph
// - diagram: rebuild graph.mmd from a saved crawl.json
// =============================================================================

use crate::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "site-flow",
    version = "0.1.0",
    about = "Crawl a website's internal pages and map how they link together",
    long_about = "site-flow crawls a website breadth-first from a seed URL, staying on the \
                  same site, and emits the page/link graph as JSON and as a Mermaid flowchart \
                  you can render into a diagram."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and build its page/link graph
    ///
    /// Example: site-flow crawl https://example.com --max-pages 50 --out-dir out/
    Crawl {
        /// Seed URL to start from (must include http:// or https://)
        seed: String,

        /// Stop after this many distinct pages (1-5000)
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,

        /// How many link hops to follow from the seed (0-20)
        ///
        /// Depth 0 = just the seed page
        /// Depth 1 = seed + every page it links to
        /// etc.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Number of pages fetched at the same time
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Print the crawl result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Print the Mermaid flowchart
        #[arg(long)]
        mermaid: bool,

        /// Also save crawl.json and graph.mmd into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Regenerate the Mermaid flowchart from a saved crawl.json
    ///
    /// Example: site-flow diagram out/crawl.json --output graph.mmd
    Diagram {
        /// Path to a crawl.json written by `site-flow crawl --out-dir`
        crawl_json: PathBuf,

        /// Write the diagram here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
