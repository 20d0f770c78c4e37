// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules (leaf-first):
// - normalize: canonical URL keys for links
// - scope: same-site check against the seed
// - fetch: downloads a page and classifies the response
// - extract: pulls links out of HTML
// - queue: the breadth-first crawl loop that ties them together
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-site restriction (scheme + host + port must match the seed)
// - Page and depth limits
// - Optional bounded concurrency that never changes the result
// =============================================================================

mod extract;
mod fetch;
mod normalize;
mod queue;
mod scope;

// Re-export the main crawling function and the state it produces
pub use queue::{crawl_website, CrawlState};

#[cfg(test)]
pub(crate) use normalize::normalize_url;
