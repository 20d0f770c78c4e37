// src/graph/artifacts.rs
// =============================================================================
// Saves the two downloadable outputs of a crawl:
// - crawl.json: the CrawlResult
// - graph.mmd:  the Mermaid diagram text
// =============================================================================

use super::result::CrawlResult;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CRAWL_JSON_FILE: &str = "crawl.json";
pub const DIAGRAM_FILE: &str = "graph.mmd";

// Writes crawl.json and graph.mmd into `dir` (created if missing)
//
// Returns: the paths that were written, JSON first
pub fn write_artifacts(
    dir: &Path,
    result: &CrawlResult,
    diagram: &str,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let json_path = dir.join(CRAWL_JSON_FILE);
    let mut json = result.to_json()?;
    json.push('\n');
    fs::write(&json_path, json)?;

    let diagram_path = dir.join(DIAGRAM_FILE);
    fs::write(&diagram_path, diagram)?;

    info!("Wrote {} and {}", json_path.display(), diagram_path.display());
    Ok((json_path, diagram_path))
}

// Loads a previously saved crawl.json
pub fn read_crawl_json(path: &Path) -> Result<CrawlResult> {
    let json = fs::read_to_string(path)?;
    CrawlResult::from_json(&json)
}
