// src/crawl/normalize.rs
// =============================================================================
// Turns whatever we find in an href="..." into a canonical URL string.
//
// Two links point at the same page if and only if they normalize to the same
// string, so this function is the only key we use for "have we seen this?".
// It must be pure: same (base, href) in, same string out.
//
// Rules, in order:
// 1. No href -> nothing
// 2. mailto:, tel:, javascript:, data: -> nothing
// 3. Resolve against the page URL and drop the #fragment
// 4. Anything that isn't http/https after resolving -> nothing
// 5. Default ports (:80 for http, :443 for https) disappear
// 6. Runs of slashes in the path collapse to one ("//a//b" -> "/a/b")
//
// Rust concepts:
// - Newtype pattern: NormalizedUrl wraps a String so the compiler won't let us
//   mix up raw hrefs and canonical keys
// - Option<T>: "not a crawlable link" is None, never a sentinel string
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// Schemes that never lead to another page
const SKIPPED_SCHEMES: [&str; 4] = ["mailto:", "tel:", "javascript:", "data:"];

// A canonical, absolute http(s) URL used as a page identity
//
// Ordering is plain string ordering, which is what the exporter sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Wraps a string that did NOT go through normalize_url
    //
    // Only used for the seed fallback: if the seed itself can't be normalized
    // we still crawl the literal string instead of giving up.
    pub(crate) fn verbatim(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NormalizedUrl> for String {
    fn from(url: NormalizedUrl) -> Self {
        url.0
    }
}

// Normalizes a link found on a page
//
// Parameters:
//   base: the URL of the page the link was found on
//   href: the raw href attribute (None if the anchor had none)
//
// Returns: Some(canonical URL) or None if the link isn't crawlable
//
// Examples:
//   base = "http://a.com:80/", href = "/x"        -> "http://a.com/x"
//   base = "http://a.com/",    href = "/p#top"    -> "http://a.com/p"
//   base = "http://a.com/",    href = "mailto:me" -> None
pub fn normalize_url(base: &str, href: Option<&str>) -> Option<NormalizedUrl> {
    let href = href?.trim();

    if has_skipped_scheme(href) {
        return None;
    }

    let base = Url::parse(base).ok()?;
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    // Url never keeps an explicit default port: "http://a.com:80/" already
    // serializes as "http://a.com/", so rule 5 is handled by the parser.

    let collapsed = collapse_slashes(url.path());
    if collapsed != url.path() {
        url.set_path(&collapsed);
    }

    Some(NormalizedUrl(url.into()))
}

// Case-insensitive prefix check against SKIPPED_SCHEMES
fn has_skipped_scheme(href: &str) -> bool {
    SKIPPED_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

// "//a///b/" -> "/a/b/", "" -> "/"
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_was_slash = false;

    for c in path.chars() {
        if c == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        collapsed.push(c);
    }

    if collapsed.is_empty() {
        collapsed.push('/');
    }

    collapsed
}
