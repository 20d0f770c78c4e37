// src/crawl/queue.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the (normalized) seed URL in a queue at depth 0
// 2. Take the next unvisited URL off the front of the queue, mark it visited
// 3. Fetch it and remember its HTTP status (None if the fetch failed)
// 4. If we got HTML and the page is above max_depth, extract its links
// 5. For every same-site link: record an edge, and queue it if unvisited
// 6. Repeat until the queue is empty or max_pages pages have been visited
//
// Termination:
// - Every URL is fetched at most once (the visited set is checked both when
//   queueing and when dequeueing)
// - The loop stops after max_pages distinct pages, so even a site that
//   generates endless distinct URLs can't keep us busy forever
//
// Concurrency:
// - With workers = 1 (default) exactly one request is in flight at a time
// - With workers = N we take up to N unvisited items off the queue at once,
//   never more than the remaining page budget, fetch them together, and then
//   expand them in the order they were dequeued. That visits exactly the same
//   pages as the one-at-a-time loop and can never overshoot max_pages
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first crawling
// - futures::StreamExt::buffered: run N futures at once, results in order
// =============================================================================

use super::extract::extract_links;
use super::fetch::{FetchOutcome, Fetcher};
use super::normalize::{normalize_url, NormalizedUrl};
use super::scope::{is_internal, NetworkLocation};
use crate::config::CrawlConfig;
use crate::error::Result;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::{info, warn};

// Represents a page in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: NormalizedUrl,
    depth: usize, // How many link hops from the seed (seed = 0)
}

// Everything a single crawl accumulates
//
// Created fresh for every crawl and handed to the exporter at the end.
#[derive(Debug)]
pub struct CrawlState {
    pub(crate) seed: NormalizedUrl,
    queue: VecDeque<CrawlItem>,
    pub(crate) visited: HashSet<NormalizedUrl>,
    pub(crate) edges: BTreeSet<(NormalizedUrl, NormalizedUrl)>,
    // None = the fetch failed outright
    pub(crate) statuses: HashMap<NormalizedUrl, Option<u16>>,
}

impl CrawlState {
    pub(crate) fn new(seed: NormalizedUrl) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(CrawlItem {
            url: seed.clone(),
            depth: 0,
        });

        Self {
            seed,
            queue,
            visited: HashSet::new(),
            edges: BTreeSet::new(),
            statuses: HashMap::new(),
        }
    }

    // Takes up to `budget` unvisited items off the front of the queue
    //
    // Already-visited items are discarded on the way and don't use up budget.
    fn take_batch(&mut self, budget: usize) -> Vec<CrawlItem> {
        let mut batch = Vec::with_capacity(budget);

        while batch.len() < budget {
            let Some(item) = self.queue.pop_front() else {
                break;
            };

            if !self.visited.insert(item.url.clone()) {
                continue;
            }

            self.statuses.insert(item.url.clone(), None);
            batch.push(item);
        }

        batch
    }

    // Records edges from a page and queues the targets we haven't seen yet
    //
    // Edges are recorded even toward visited or already-queued pages: we want
    // every internal link, not just the ones that led somewhere new.
    fn expand(
        &mut self,
        from: &CrawlItem,
        links: BTreeSet<NormalizedUrl>,
        root: Option<&NetworkLocation>,
    ) {
        for link in links {
            let internal = root.map_or(false, |root| is_internal(link.as_str(), root));
            if !internal {
                continue;
            }

            self.edges.insert((from.url.clone(), link.clone()));

            if !self.visited.contains(&link) {
                self.queue.push_back(CrawlItem {
                    url: link,
                    depth: from.depth + 1,
                });
            }
        }
    }
}

// Crawls a website starting from config.seed
//
// Parameters:
//   config: seed, page/depth limits, timeout, number of workers
//
// Returns: the final CrawlState. The only possible error is failing to build
// the HTTP client; nothing that happens while crawling is fatal.
//
// Example:
//   max_depth=0: Only fetch the seed
//   max_depth=1: Fetch the seed + all pages it links to
//   max_depth=2: ... + all pages those link to
pub async fn crawl_website(config: &CrawlConfig) -> Result<CrawlState> {
    let fetcher = Fetcher::new(config)?;
    Ok(run_crawl(config, &fetcher).await)
}

// The traversal itself, with the fetcher passed in
pub async fn run_crawl(config: &CrawlConfig, fetcher: &Fetcher) -> CrawlState {
    let seed = resolve_seed(&config.seed);

    // Links are only followed if they live on the same scheme+host+port as the seed
    let root = NetworkLocation::of(seed.as_str());
    if root.is_none() {
        warn!("Seed {} has no network location; no links will be followed", seed);
    }

    let workers = config.workers.max(1);
    let mut state = CrawlState::new(seed);

    info!(
        "Crawling {} (max pages: {}, max depth: {}, workers: {})",
        state.seed, config.max_pages, config.max_depth, workers
    );

    while !state.queue.is_empty() && state.visited.len() < config.max_pages {
        let budget = workers.min(config.max_pages - state.visited.len());
        let batch = state.take_batch(budget);

        // buffered() keeps results in the same order as the batch
        let outcomes: Vec<(CrawlItem, FetchOutcome)> = stream::iter(batch)
            .map(|item| async move {
                info!("  Crawling [depth {}]: {}", item.depth, item.url);
                let outcome = fetcher.fetch(item.url.as_str()).await;
                (item, outcome)
            })
            .buffered(workers)
            .collect()
            .await;

        for (item, outcome) in outcomes {
            state.statuses.insert(item.url.clone(), outcome.status());

            // Only HTML pages above the depth limit get expanded
            let body = match outcome.into_body() {
                Some(body) if item.depth < config.max_depth => body,
                _ => continue,
            };

            let links = extract_links(item.url.as_str(), &body);
            state.expand(&item, links, root.as_ref());
        }
    }

    info!(
        "Crawl complete. Visited {} page(s), recorded {} link(s)",
        state.visited.len(),
        state.edges.len()
    );

    state
}

// Normalizes the seed the same way as every other link
//
// Falls back to the literal string so a weird seed still produces a (tiny)
// crawl instead of nothing at all.
fn resolve_seed(seed: &str) -> NormalizedUrl {
    let seed = seed.trim();
    normalize_url(seed, Some("")).unwrap_or_else(|| {
        warn!("Could not normalize seed '{}', using it as-is", seed);
        NormalizedUrl::verbatim(seed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{render_mermaid, CrawlResult};
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path, path_regex},
        Mock, MockServer, Request, ResponseTemplate,
    };

    // Serves an HTML page at `page` whose body links to each of `links`
    async fn mount_page(server: &MockServer, page: &str, links: &[&str]) {
        let mut html = String::from("<html><body>");
        for link in links {
            html.push_str(&format!(r#"<a href="{}">{}</a>"#, link, link));
        }
        html.push_str("</body></html>");

        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(html, "text/html"),
            )
            .mount(server)
            .await;
    }

    fn config(server: &MockServer) -> CrawlConfig {
        CrawlConfig::new(server.uri()).with_timeout(Duration::from_secs(5))
    }

    async fn crawl(config: &CrawlConfig) -> CrawlResult {
        let state = crawl_website(config).await.unwrap();
        CrawlResult::from_state(state)
    }

    fn urls(result: &CrawlResult) -> Vec<&str> {
        result.nodes.iter().map(|n| n.url.as_str()).collect()
    }

    // Counts "Nx --> Ny" lines in a diagram
    fn connection_lines(diagram: &str) -> usize {
        diagram.lines().filter(|l| l.contains("-->")).count()
    }

    #[tokio::test]
    async fn test_link_cycle_terminates() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a"]).await;
        mount_page(&mock_server, "/a", &["/b"]).await;
        mount_page(&mock_server, "/b", &["/"]).await;

        let config = config(&mock_server).with_max_pages(100).with_max_depth(10);
        let result = crawl(&config).await;
        let base = mock_server.uri();

        assert_eq!(result.seed, format!("{}/", base));
        assert_eq!(
            urls(&result),
            vec![format!("{}/", base), format!("{}/a", base), format!("{}/b", base)]
        );
        assert!(result.nodes.iter().all(|n| n.status == Some(200)));
        assert_eq!(result.edges.len(), 3);

        // Each page was fetched exactly once
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_edges_include_links_to_visited_pages() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a", "/b"]).await;
        mount_page(&mock_server, "/a", &["/", "/b", "/a#self"]).await;
        mount_page(&mock_server, "/b", &["/a"]).await;

        let result = crawl(&config(&mock_server)).await;
        let base = mock_server.uri();
        let edges: Vec<(String, String)> = result
            .edges
            .iter()
            .map(|e| (e.from.replace(&base, ""), e.to.replace(&base, "")))
            .collect();

        assert_eq!(
            edges,
            vec![
                ("/".to_string(), "/a".to_string()),
                ("/".to_string(), "/b".to_string()),
                ("/a".to_string(), "/".to_string()),
                ("/a".to_string(), "/a".to_string()),
                ("/a".to_string(), "/b".to_string()),
                ("/b".to_string(), "/a".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_page_limit_keeps_dangling_edges() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a", "/b"]).await;
        mount_page(&mock_server, "/a", &[]).await;
        mount_page(&mock_server, "/b", &[]).await;

        let config = config(&mock_server).with_max_pages(1);
        let result = crawl(&config).await;

        assert_eq!(result.nodes.len(), 1);
        // The seed's links were discovered (and kept) but never fetched
        assert_eq!(result.edges.len(), 2);
        assert_eq!(result.dangling_edges().count(), 2);

        let diagram = render_mermaid(&result);
        assert_eq!(connection_lines(&diagram), 0);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_depth_zero_visits_only_seed() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a", "/b"]).await;
        mount_page(&mock_server, "/a", &[]).await;

        let config = config(&mock_server).with_max_depth(0);
        let result = crawl(&config).await;

        assert_eq!(urls(&result), vec![format!("{}/", mock_server.uri())]);
        assert!(result.edges.is_empty());
    }

    #[tokio::test]
    async fn test_depth_limit_fetches_but_does_not_expand_last_level() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a"]).await;
        mount_page(&mock_server, "/a", &["/b"]).await;
        mount_page(&mock_server, "/b", &["/c"]).await;

        let config = config(&mock_server).with_max_depth(1);
        let result = crawl(&config).await;
        let base = mock_server.uri();

        // /a is discovered at depth 1: fetched, but its link to /b is never extracted
        assert_eq!(urls(&result), vec![format!("{}/", base), format!("{}/a", base)]);
        assert_eq!(result.edges.len(), 1);
    }

    #[tokio::test]
    async fn test_external_links_are_ignored() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            &["/inside", "https://other.example/", "mailto:me@example.com"],
        )
        .await;
        mount_page(&mock_server, "/inside", &[]).await;

        let result = crawl(&config(&mock_server)).await;

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.edges.len(), 1);
        assert!(result.edges[0].to.ends_with("/inside"));
    }

    #[tokio::test]
    async fn test_non_html_and_missing_pages_are_recorded() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/data.json", "/missing"]).await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"<a href="/never">not really html</a>"#, "application/json"),
            )
            .mount(&mock_server)
            .await;

        let result = crawl(&config(&mock_server)).await;
        let base = mock_server.uri();

        let statuses: Vec<(String, Option<u16>)> = result
            .nodes
            .iter()
            .map(|n| (n.url.replace(&base, ""), n.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("/".to_string(), Some(200)),
                ("/data.json".to_string(), Some(200)),
                ("/missing".to_string(), Some(404)),
            ]
        );
        assert!(!result.edges.iter().any(|e| e.to.ends_with("/never")));
    }

    #[tokio::test]
    async fn test_every_fetch_timing_out_still_returns_a_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"<a href="/a">a</a>"#, "text/html")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let config = config(&mock_server).with_timeout(Duration::from_millis(50));
        let result = crawl(&config).await;

        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].status, None);
        assert!(result.edges.is_empty());
    }

    #[tokio::test]
    async fn test_endless_site_is_capped_by_page_limit() {
        let mock_server = MockServer::start().await;

        // /p/N always links to /p/N+1, forever
        Mock::given(method("GET"))
            .and(path_regex(r"^/p/\d+$"))
            .respond_with(|request: &Request| {
                let n: u64 = request
                    .url
                    .path()
                    .trim_start_matches("/p/")
                    .parse()
                    .unwrap_or(0);
                ResponseTemplate::new(200)
                    .set_body_raw(format!(r#"<a href="/p/{}">next</a>"#, n + 1), "text/html")
            })
            .mount(&mock_server)
            .await;

        let config = CrawlConfig::new(format!("{}/p/0", mock_server.uri()))
            .with_timeout(Duration::from_secs(5))
            .with_max_pages(25)
            .with_max_depth(20);
        let result = crawl(&config).await;

        // max_depth stops the chain at /p/20 before max_pages is reached
        assert_eq!(result.nodes.len(), 21);

        let config = config.with_max_pages(7);
        let result = crawl(&config).await;
        assert_eq!(result.nodes.len(), 7);
    }

    #[tokio::test]
    async fn test_mounted_pages_are_served_as_html() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a"]).await;

        let config = config(&mock_server);
        let fetcher = Fetcher::new(&config).unwrap();
        let outcome = fetcher.fetch(&format!("{}/", mock_server.uri())).await;

        assert_eq!(outcome.status(), Some(200));
        let body = outcome.into_body().expect("mounted page should be html");
        assert!(body.contains(r#"<a href="/a">"#));
    }

    #[tokio::test]
    async fn test_seed_links_are_expanded() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a"]).await;
        mount_page(&mock_server, "/a", &[]).await;

        let result = crawl(&config(&mock_server)).await;
        let seed = format!("{}/", mock_server.uri());

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].from, seed);
        assert_eq!(result.edges[0].to, format!("{}/a", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_crawls_are_deterministic() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/b", "/a", "/c?x=1"]).await;
        mount_page(&mock_server, "/a", &["/b", "/"]).await;
        mount_page(&mock_server, "/b", &["/c?x=1", "/a"]).await;
        mount_page(&mock_server, "/c", &["/"]).await;

        let config = config(&mock_server);
        let first = crawl(&config).await;
        let second = crawl(&config).await;

        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_eq!(render_mermaid(&first), render_mermaid(&second));
    }

    #[tokio::test]
    async fn test_workers_produce_the_same_graph() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", &["/a", "/b", "/c", "/d"]).await;
        for page in ["/a", "/b", "/c", "/d"] {
            mount_page(&mock_server, page, &["/", "/e", "/f"]).await;
        }
        mount_page(&mock_server, "/e", &["/g"]).await;
        mount_page(&mock_server, "/f", &["/g"]).await;
        mount_page(&mock_server, "/g", &[]).await;

        for max_pages in [3, 6, 100] {
            let sequential = crawl(&config(&mock_server).with_max_pages(max_pages)).await;
            let concurrent =
                crawl(&config(&mock_server).with_max_pages(max_pages).with_workers(4)).await;

            assert_eq!(sequential, concurrent, "max_pages = {}", max_pages);
            assert_eq!(concurrent.nodes.len(), max_pages.min(8));
        }
    }

    #[tokio::test]
    async fn test_workers_never_overshoot_page_limit() {
        let mock_server = MockServer::start().await;
        let many: Vec<String> = (0..20).map(|i| format!("/page{}", i)).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        mount_page(&mock_server, "/", &many).await;
        for page in &many {
            mount_page(&mock_server, page, &[]).await;
        }

        let config = config(&mock_server).with_max_pages(5).with_workers(8);
        let result = crawl(&config).await;

        assert_eq!(result.nodes.len(), 5);
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 5);
    }

    #[tokio::test]
    async fn test_unusable_seed_falls_back_to_trimmed_literal() {
        let config = CrawlConfig::new("  http:// ").with_timeout(Duration::from_secs(1));
        let result = crawl(&config).await;

        assert_eq!(result.seed, "http://");
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].status, None);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_take_batch_skips_visited_and_respects_budget() {
        let seed = normalize_url("http://a.com/", Some("")).unwrap();
        let mut state = CrawlState::new(seed.clone());
        let root = NetworkLocation::of("http://a.com/");
        let item = CrawlItem { url: seed, depth: 0 };

        let batch = state.take_batch(1);
        assert_eq!(batch.len(), 1);

        let links: BTreeSet<NormalizedUrl> = ["/", "/x", "/y", "/z", "http://b.com/"]
            .iter()
            .filter_map(|href| normalize_url("http://a.com/", Some(href)))
            .collect();
        state.expand(&item, links, root.as_ref());

        // "/" is already visited, b.com is external
        assert_eq!(state.queue.len(), 3);
        assert_eq!(state.edges.len(), 4);

        let batch = state.take_batch(2);
        let taken: Vec<&str> = batch.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(taken, vec!["http://a.com/x", "http://a.com/y"]);
        assert!(batch.iter().all(|i| i.depth == 1));
        assert_eq!(state.visited.len(), 3);
    }
}
