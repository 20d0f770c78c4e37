// src/graph/mod.rs
// =============================================================================
// This module turns a finished crawl into its outputs.
//
// Submodules:
// - result: the sorted CrawlResult record (crawl.json)
// - mermaid: the flowchart text (graph.mmd) fed to a diagram renderer
// - artifacts: reading/writing those two files
//
// Rendering the flowchart into an image is left to Mermaid itself.
// =============================================================================

mod artifacts;
mod mermaid;
mod result;

pub use artifacts::{read_crawl_json, write_artifacts};
pub use mermaid::render_mermaid;
pub use result::{CrawlResult, LinkEdge, PageNode};
