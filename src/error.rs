// src/error.rs
// =============================================================================
// Error types shared by the crawler, the config layer and the exporters.
//
// Only a handful of things can actually fail in this program:
// - The user gave us a bad seed URL or an out-of-range limit
// - The HTTP client could not be built
// - Reading/writing crawl.json or graph.mmd on disk
//
// Everything that happens *during* a crawl (timeouts, 404s, broken HTML, weird
// links) is NOT an error - it is recorded in the crawl graph instead.
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error for our enums
// - #[from]: lets the ? operator convert other error types automatically
// =============================================================================

use thiserror::Error;

// Problems with the crawl settings, caught before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The seed doesn't start with http:// or https://
    #[error("Please include http:// or https:// in the URL (got '{0}')")]
    MissingScheme(String),

    #[error("max pages must be between 1 and {max} (got {value})")]
    PageLimitOutOfRange { value: usize, max: usize },

    #[error("max depth must be at most {max} (got {value})")]
    DepthOutOfRange { value: usize, max: usize },

    #[error("at least one worker is required")]
    NoWorkers,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
