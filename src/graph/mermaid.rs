// src/graph/mermaid.rs
// =============================================================================
// Renders a CrawlResult as a Mermaid flowchart (graph.mmd).
//
// Output looks like:
//   flowchart TD
//     N1["https://example.com/"]
//     N2["https://example.com/about"]
//     N1 --> N2
//
// - Node ids follow the (sorted) node order: first node is N1, and so on
// - All declarations come first, then all connections
// - Edges whose endpoints aren't both declared nodes are skipped
//
// The diagram is a pure function of the CrawlResult, so it can always be
// regenerated from a saved crawl.json.
// =============================================================================

use super::result::CrawlResult;
use std::collections::HashMap;

pub fn render_mermaid(result: &CrawlResult) -> String {
    let mut ids: HashMap<&str, String> = HashMap::with_capacity(result.nodes.len());
    let mut lines = vec!["flowchart TD".to_string()];

    for (index, node) in result.nodes.iter().enumerate() {
        let id = format!("N{}", index + 1);
        lines.push(format!("  {}[\"{}\"]", id, escape_label(&node.url)));
        ids.insert(node.url.as_str(), id);
    }

    for edge in &result.edges {
        if let (Some(from), Some(to)) = (ids.get(edge.from.as_str()), ids.get(edge.to.as_str())) {
            lines.push(format!("  {} --> {}", from, to));
        }
    }

    let mut diagram = lines.join("\n");
    diagram.push('\n');
    diagram
}

// A raw " would end the label early; Mermaid spells it as an entity code
fn escape_label(url: &str) -> String {
    url.replace('"', "#quot;")
}
