// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Print the crawl graph (table, JSON and/or Mermaid) and save files
// 4. Exit with proper code (0 = success, 2 = error)
//
// A crawl where every page failed to load is still a success: the result
// just says so (one node, status null, no edges).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - crawl settings and validation
mod crawl;    // src/crawl/ - the crawler itself
mod error;    // src/error.rs - error types
mod graph;    // src/graph/ - JSON and Mermaid output
mod logging;  // src/logging.rs - tracing setup

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::CrawlConfig;
use graph::CrawlResult;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = done
//   Ok(2) = the user gave us something we can't crawl
//   Err = unexpected error (also exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed,
            max_pages,
            max_depth,
            timeout,
            workers,
            json,
            mermaid,
            out_dir,
        } => {
            let config = CrawlConfig::new(seed)
                .with_max_pages(max_pages)
                .with_max_depth(max_depth)
                .with_timeout(Duration::from_secs(timeout))
                .with_workers(workers);

            let output = CrawlOutput { json, mermaid, out_dir };
            handle_crawl(&config, &output).await
        }
        Commands::Diagram { crawl_json, output } => handle_diagram(&crawl_json, output.as_deref()),
    }
}

// What the user asked us to print/save after a crawl
struct CrawlOutput {
    json: bool,
    mermaid: bool,
    out_dir: Option<PathBuf>,
}

// Handles the 'crawl' subcommand
async fn handle_crawl(config: &CrawlConfig, output: &CrawlOutput) -> Result<i32> {
    // Bad input is the user's problem, not a crash: print it and bail out
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return Ok(2);
    }

    let state = crawl::crawl_website(config)
        .await
        .context("Could not start the crawl")?;

    let result = CrawlResult::from_state(state);
    let diagram = graph::render_mermaid(&result);

    if output.json {
        println!("{}", result.to_json()?);
    } else {
        print_summary(&result);
    }

    if output.mermaid {
        print!("{}", diagram);
    }

    if let Some(dir) = &output.out_dir {
        let (json_path, diagram_path) = graph::write_artifacts(dir, &result, &diagram)
            .with_context(|| format!("Failed to save results to {}", dir.display()))?;

        // Keep stdout clean when it's carrying JSON
        if !output.json {
            println!("💾 Saved {} and {}", json_path.display(), diagram_path.display());
        }
    }

    Ok(0)
}

// Handles the 'diagram' subcommand
fn handle_diagram(crawl_json: &Path, output: Option<&Path>) -> Result<i32> {
    let result = graph::read_crawl_json(crawl_json)
        .with_context(|| format!("Failed to read {}", crawl_json.display()))?;

    let diagram = graph::render_mermaid(&result);

    match output {
        Some(path) => {
            std::fs::write(path, &diagram)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("💾 Saved {}", path.display());
        }
        None => print!("{}", diagram),
    }

    Ok(0)
}

// Prints the summary and a human-readable table of visited pages
fn print_summary(result: &CrawlResult) {
    println!("📌 Summary:");
    println!("   Seed: {}", result.seed);
    println!("   Pages found: {}", result.nodes.len());
    println!("   Links found: {}", result.edges.len());

    let unvisited = result.dangling_edges().count();
    if unvisited > 0 {
        println!("   Links to pages not visited (page limit reached): {}", unvisited);
    }
    println!();

    println!("{:<80} {:<10}", "URL", "STATUS");
    println!("{}", "=".repeat(91));

    for node in &result.nodes {
        // Truncate URL if too long for display (on a char boundary)
        let url_display = if node.url.chars().count() > 77 {
            format!("{}...", node.url.chars().take(77).collect::<String>())
        } else {
            node.url.clone()
        };

        println!("{:<80} {:<10}", url_display, format_status(node.status));
    }

    println!();
}

fn format_status(status: Option<u16>) -> String {
    match status {
        Some(code @ 200..=299) => format!("✅ {}", code),
        Some(code @ 300..=399) => format!("🔀 {}", code),
        Some(code) => format!("❌ {}", code),
        None => "⚠️  FAILED".to_string(),
    }
}
