// src/config.rs
// =============================================================================
// Crawl settings.
//
// Everything a crawl needs to know lives in one immutable CrawlConfig value
// that is passed into the crawler. There is no global state: two crawls with
// equal configs against an unchanged site produce identical output.
//
// Allowed ranges: 1..=5000 pages, 0..=20 levels.
// =============================================================================

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_MAX_PAGES: usize = 200;
pub const MAX_PAGES_LIMIT: usize = 5000;
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const MAX_DEPTH_LIMIT: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_WORKERS: usize = 1;

// Sent with every request so site owners can tell who is crawling them
pub const USER_AGENT: &str = "SimpleFlowCrawler/0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Where the crawl starts (must be an absolute http/https URL)
    pub seed: String,
    /// Stop after this many distinct pages have been fetched
    pub max_pages: usize,
    /// Pages discovered at this depth are fetched but not expanded
    pub max_depth: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// How many pages may be fetched at the same time (1 = strictly sequential)
    pub workers: usize,
    pub user_agent: String,
}

impl CrawlConfig {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            workers: DEFAULT_WORKERS,
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    // Checks the settings before we start crawling
    //
    // Only the seed's scheme prefix is checked; the crawler copes with
    // anything else odd about the seed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seed = self.seed.trim();
        if !(seed.starts_with("http://") || seed.starts_with("https://")) {
            return Err(ConfigError::MissingScheme(self.seed.clone()));
        }

        if self.max_pages == 0 || self.max_pages > MAX_PAGES_LIMIT {
            return Err(ConfigError::PageLimitOutOfRange {
                value: self.max_pages,
                max: MAX_PAGES_LIMIT,
            });
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthOutOfRange {
                value: self.max_depth,
                max: MAX_DEPTH_LIMIT,
            });
        }

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}
