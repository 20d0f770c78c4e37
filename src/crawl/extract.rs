// src/crawl/extract.rs
// =============================================================================
// Pulls links out of a fetched HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the same way a
//   browser does, so unclosed tags or stray junk never make us fail a page
//
// Every href goes through normalize_url with the page itself as the base,
// so the result is already a set of canonical URL keys.
// =============================================================================

use super::normalize::{normalize_url, NormalizedUrl};
use scraper::{Html, Selector};
use std::collections::BTreeSet;

// Extracts the set of crawlable links on a page
//
// Parameters:
//   page_url: the URL of the page (for resolving relative links)
//   html: the page body
//
// Returns: a BTreeSet, so duplicates disappear and iteration order is stable
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs#intro'>Intro</a>"
//   page_url = "https://example.com/"
//   result = {"https://example.com/docs"}
pub fn extract_links(page_url: &str, html: &str) -> BTreeSet<NormalizedUrl> {
    let document = Html::parse_document(html);

    // "a[href]" means "all <a> tags that have an href attribute"
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return BTreeSet::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| normalize_url(page_url, element.value().attr("href")))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BTreeSet instead of HashSet?
//    - Both remove duplicates
//    - BTreeSet also keeps items sorted, so iterating it always gives the
//      same order. The crawl queue is filled from this set, which makes the
//      whole crawl reproducible
//
// 2. What does filter_map do?
//    - It calls the closure on every element and keeps only the Some(...)
//      results, unwrapping them on the way
//    - Here it throws away anchors whose href isn't a crawlable link
//
// 3. Why no error type?
//    - Html::parse_document never fails: broken HTML still produces a tree
//    - So "extract links" can't fail either, and we just return a set
// -----------------------------------------------------------------------------
