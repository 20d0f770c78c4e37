// src/crawl/scope.rs
// =============================================================================
// Keeps the crawl on one site.
//
// A link is "internal" when its network location (scheme + host + port) is
// exactly the seed's. So for a seed of http://a.com/:
//   http://a.com/sub   -> internal
//   http://b.com/      -> external (different host)
//   https://a.com/     -> external (different scheme, different default port)
//   http://a.com:8080/ -> external (different port)
//
// Subdomains are separate sites here: www.a.com is not a.com.
// =============================================================================

use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkLocation(String);

impl NetworkLocation {
    // Returns None if the URL can't be parsed or has no host
    pub fn of(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;

        let location = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };

        Some(Self(location))
    }
}

impl fmt::Display for NetworkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Checks if a (normalized) URL belongs to the seed's site
//
// Anything that fails to parse is simply "not internal".
pub fn is_internal(url: &str, root: &NetworkLocation) -> bool {
    NetworkLocation::of(url).map_or(false, |location| &location == root)
}
