// src/graph/result.rs
// =============================================================================
// The final, read-only crawl graph (what ends up in crawl.json).
//
// Shape:
// {
//   "seed": "https://example.com/",
//   "nodes": [ { "url": "...", "status": 200 }, { "url": "...", "status": null } ],
//   "edges": [ { "from": "...", "to": "..." } ]
// }
//
// Nodes are sorted by url and edges by (from, to), so crawling an unchanged
// site twice gives byte-identical JSON no matter in which order the pages
// were actually fetched.
// =============================================================================

use crate::crawl::CrawlState;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    pub url: String,
    /// HTTP status code, or null if the page couldn't be fetched at all
    pub status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub seed: String,
    pub nodes: Vec<PageNode>,
    pub edges: Vec<LinkEdge>,
}

impl CrawlResult {
    // Freezes a finished crawl into its sorted, exportable form
    pub fn from_state(state: CrawlState) -> Self {
        let CrawlState {
            seed,
            visited,
            edges,
            statuses,
            ..
        } = state;

        let mut urls: Vec<_> = visited.into_iter().collect();
        urls.sort();

        let nodes = urls
            .into_iter()
            .map(|url| PageNode {
                status: statuses.get(&url).copied().flatten(),
                url: url.into(),
            })
            .collect();

        // A BTreeSet of (from, to) already iterates in sorted order
        let edges = edges
            .into_iter()
            .map(|(from, to)| LinkEdge {
                from: from.into(),
                to: to.into(),
            })
            .collect();

        Self {
            seed: seed.into(),
            nodes,
            edges,
        }
    }

    // Edges pointing at pages that were discovered but never visited
    //
    // These only appear when max_pages cut the crawl short. They stay in the
    // JSON as a record of what was found; the diagram leaves them out.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &LinkEdge> {
        let known: HashSet<&str> = self.nodes.iter().map(|n| n.url.as_str()).collect();
        self.edges
            .iter()
            .filter(move |e| !known.contains(e.from.as_str()) || !known.contains(e.to.as_str()))
    }

    // Pretty-printed JSON (2-space indent, non-ASCII left as-is)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
