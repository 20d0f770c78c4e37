// src/crawl/fetch.rs
// =============================================================================
// Downloads a single page.
//
// reqwest handles the HTTP transport. What lives
// here is the policy:
// - Any network/timeout/TLS/redirect-loop failure -> Failed (no status)
// - A response that isn't text/html -> NotHtml (we keep the status code but
//   never look inside the body)
// - An HTML response -> Html (status + body text), whatever the status class;
//   an HTML 404 page still gets its links scanned
//
// fetch() never returns an error. Every failure is one of the outcomes above,
// so the crawl loop can't be stopped by a single bad page.
// =============================================================================

use crate::config::CrawlConfig;
use crate::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

// Redirect chains longer than this count as a failed fetch
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No usable response at all
    Failed,
    /// Got a response, but it isn't HTML
    NotHtml { status: u16 },
    /// Got an HTML page
    Html { status: u16, body: String },
}

impl FetchOutcome {
    // The HTTP status, or None if the fetch failed outright
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::Failed => None,
            FetchOutcome::NotHtml { status } | FetchOutcome::Html { status, .. } => Some(*status),
        }
    }

    // The HTML body, if there is one worth scanning for links
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchOutcome::Html { body, .. } => Some(body),
            _ => None,
        }
    }
}

// Wraps a reqwest Client configured for crawling
//
// Client is cheap to clone (it's an Arc internally) and pools connections,
// so one Fetcher is built per crawl and shared by every request.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    // Fetches a page and classifies the result
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Fetch failed for {}: {}", url, e);
                return FetchOutcome::Failed;
            }
        };

        let status = response.status().as_u16();

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        if !is_html {
            debug!("Skipping non-HTML response from {} (status {})", url, status);
            return FetchOutcome::NotHtml { status };
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Html { status, body },
            Err(e) => {
                // Headers arrived but the body didn't (timeout mid-download, reset, ...)
                debug!("Failed to read body from {}: {}", url, e);
                FetchOutcome::Failed
            }
        }
    }
}
