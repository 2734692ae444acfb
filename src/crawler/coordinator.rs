//! The crawl loop
//!
//! Frontier-driven breadth-first traversal of a single domain. The crawler
//! owns the raw link graph, the inverted index, and page metadata for the
//! duration of one run; per-page failures are converted into known-bad marks
//! and run-level counters, never into an aborted crawl.

use crate::config::CrawlerConfig;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::crawler::{FetchedPage, Fetcher, PageInfo};
use crate::text::{build_snippet, extract_text, extract_title, tokenize};
use crate::url::{is_admissible, normalize_url, seed_domain};
use crate::UrlError;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Run-level counters reported when a crawl finishes
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Pages successfully fetched and indexed
    pub visited: usize,
    /// URLs that failed to fetch (never retried)
    pub known_bad: usize,
    /// URLs still pending when the run ended
    pub queued: usize,
    /// Distinct tokens in the inverted index
    pub unique_tokens: usize,
}

/// Everything a finished crawl hands to the reducer and the artifact store
#[derive(Debug)]
pub struct CrawlOutput {
    /// Raw out-link lists; targets may reference pages never fetched
    pub graph: BTreeMap<String, Vec<String>>,
    /// Normalized URLs of successfully fetched pages
    pub visited: HashSet<String>,
    /// Token -> URLs containing it (deduplicated)
    pub index: BTreeMap<String, Vec<String>>,
    /// URL -> display metadata
    pub page_info: BTreeMap<String, PageInfo>,
    pub report: CrawlReport,
}

/// Frontier-driven crawler over an abstract [`Fetcher`]
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlerConfig,
    domain: String,
    frontier: Frontier,
    visited: HashSet<String>,
    known_bad: HashSet<String>,
    graph: BTreeMap<String, Vec<String>>,
    index: BTreeMap<String, Vec<String>>,
    page_info: BTreeMap<String, PageInfo>,
    stop: Arc<AtomicBool>,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler whose frontier holds the normalized seed.
    ///
    /// The `stop` flag supports clean early termination: once set, the loop
    /// finishes its current page and stops, and partial results remain valid.
    pub fn new(
        config: CrawlerConfig,
        fetcher: F,
        stop: Arc<AtomicBool>,
    ) -> Result<Self, UrlError> {
        let seed = normalize_url(&config.seed_url);
        let domain = seed_domain(&seed)?;

        let mut frontier = Frontier::new();
        frontier.push(&seed);

        Ok(Self {
            fetcher,
            config,
            domain,
            frontier,
            visited: HashSet::new(),
            known_bad: HashSet::new(),
            graph: BTreeMap::new(),
            index: BTreeMap::new(),
            page_info: BTreeMap::new(),
            stop,
        })
    }

    /// Runs the crawl until the frontier drains, the page budget is reached,
    /// or a stop is requested.
    pub async fn run(mut self) -> CrawlOutput {
        tracing::info!(
            "Starting crawl of {} (budget: {} pages)",
            self.domain,
            self.config.max_pages
        );

        loop {
            if self.visited.len() >= self.config.max_pages {
                tracing::info!("Page budget reached");
                break;
            }
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!("Stop requested; ending crawl with partial results");
                break;
            }
            let Some(url) = self.frontier.pop() else {
                tracing::info!("Frontier exhausted");
                break;
            };

            let url = normalize_url(&url);
            if self.visited.contains(&url) || self.known_bad.contains(&url) {
                continue;
            }

            // Polite delay: a courtesy contract, not a correctness one.
            if self.config.fetch_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.fetch_delay_ms)).await;
            }

            match self.fetcher.fetch(&url).await {
                Ok(page) => self.process_page(&url, page),
                Err(e) => {
                    // Fail once and skip: no retry in this design.
                    tracing::warn!("{url} failed: {e}");
                    self.known_bad.insert(url);
                }
            }
        }

        let report = CrawlReport {
            visited: self.visited.len(),
            known_bad: self.known_bad.len(),
            queued: self.frontier.len(),
            unique_tokens: self.index.len(),
        };
        tracing::info!(
            "Crawl complete: {} visited, {} bad, {} still queued, {} tokens",
            report.visited,
            report.known_bad,
            report.queued,
            report.unique_tokens
        );

        CrawlOutput {
            graph: self.graph,
            visited: self.visited,
            index: self.index,
            page_info: self.page_info,
            report,
        }
    }

    /// Handles one successful fetch: redirect collision check, link
    /// harvesting, frontier growth, and indexing.
    fn process_page(&mut self, requested: &str, page: FetchedPage) {
        let final_url = normalize_url(&page.final_url);
        if final_url != *requested && self.visited.contains(&final_url) {
            // Redirect collision: the target page was already fetched under
            // its own URL, so this fetch contributes nothing.
            tracing::debug!("{requested} redirected to already-visited {final_url}");
            return;
        }

        self.visited.insert(final_url.clone());

        let out_links = self.harvest_links(&page);
        for link in &out_links {
            if !self.visited.contains(link) && !self.known_bad.contains(link) {
                self.frontier.push(link);
            }
        }

        let words_indexed = self.index_page(&final_url, &page.body);
        tracing::info!(
            "{:5}/{:5} {} (out: {}, words: {})",
            self.visited.len(),
            self.visited.len() + self.frontier.len(),
            final_url,
            out_links.len(),
            words_indexed
        );
        self.graph.insert(final_url, out_links);
    }

    /// Extracts, normalizes, and deduplicates the admissible out-links of a
    /// page, preserving first-seen order.
    fn harvest_links(&self, page: &FetchedPage) -> Vec<String> {
        let base = match Url::parse(&page.final_url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut out_links = Vec::new();
        for raw in extract_links(&page.body, &base) {
            let link = normalize_url(&raw);
            if is_admissible(&link, &self.domain) && seen.insert(link.clone()) {
                out_links.push(link);
            }
        }
        out_links
    }

    /// Merges a page's unique tokens into the inverted index and stores its
    /// display metadata. Returns the number of unique tokens on the page.
    ///
    /// The update is idempotent: re-indexing the same URL for the same token
    /// is a no-op.
    fn index_page(&mut self, url: &str, body: &str) -> usize {
        let text = extract_text(body);
        let title = extract_title(body).unwrap_or_else(|| url.to_string());
        let snippet = build_snippet(&text);
        self.page_info
            .insert(url.to_string(), PageInfo { title, snippet });

        let unique: BTreeSet<String> = tokenize(&text).into_iter().collect();
        let count = unique.len();
        for token in unique {
            let postings = self.index.entry(token).or_default();
            if !postings.iter().any(|u| u == url) {
                postings.push(url.to_string());
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::FetchError;
    use std::collections::HashMap;

    /// In-memory fetcher: URL -> (final URL, body)
    struct StubFetcher {
        pages: HashMap<String, (String, String)>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, final_url, body)| {
                        (url.to_string(), (final_url.to_string(), body.to_string()))
                    })
                    .collect(),
            }
        }
    }

    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            match self.pages.get(url) {
                Some((final_url, body)) => Ok(FetchedPage {
                    final_url: final_url.clone(),
                    body: body.clone(),
                }),
                None => Err(FetchError::Status(404)),
            }
        }
    }

    fn test_config(max_pages: usize) -> CrawlerConfig {
        CrawlerConfig {
            seed_url: "https://caltech.edu/".to_string(),
            max_pages,
            fetch_delay_ms: 0,
        }
    }

    fn page(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!("<a href=\"{l}\">x</a>"))
            .collect();
        format!("<html><head><title>{title}</title></head><body><p>{title} body</p>{anchors}</body></html>")
    }

    async fn crawl(fetcher: StubFetcher, max_pages: usize) -> CrawlOutput {
        let crawler = Crawler::new(test_config(max_pages), fetcher, Arc::default()).unwrap();
        crawler.run().await
    }

    #[tokio::test]
    async fn test_single_page_crawl() {
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            &page("Home", &[]),
        )]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(output.report.visited, 1);
        assert!(output.visited.contains("https://caltech.edu"));
        assert_eq!(output.page_info["https://caltech.edu"].title, "Home");
    }

    #[tokio::test]
    async fn test_breadth_first_discovery() {
        let fetcher = StubFetcher::new(&[
            (
                "https://caltech.edu",
                "https://caltech.edu/",
                &page("Home", &["/a", "/b"]),
            ),
            (
                "https://caltech.edu/a",
                "https://caltech.edu/a",
                &page("A", &["/c"]),
            ),
            (
                "https://caltech.edu/b",
                "https://caltech.edu/b",
                &page("B", &[]),
            ),
            (
                "https://caltech.edu/c",
                "https://caltech.edu/c",
                &page("C", &[]),
            ),
        ]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(output.report.visited, 4);
        assert_eq!(
            output.graph["https://caltech.edu"],
            vec!["https://caltech.edu/a", "https://caltech.edu/b"]
        );
    }

    #[tokio::test]
    async fn test_page_budget_respected() {
        let fetcher = StubFetcher::new(&[
            (
                "https://caltech.edu",
                "https://caltech.edu/",
                &page("Home", &["/a", "/b", "/c"]),
            ),
            (
                "https://caltech.edu/a",
                "https://caltech.edu/a",
                &page("A", &[]),
            ),
            (
                "https://caltech.edu/b",
                "https://caltech.edu/b",
                &page("B", &[]),
            ),
            (
                "https://caltech.edu/c",
                "https://caltech.edu/c",
                &page("C", &[]),
            ),
        ]);
        let output = crawl(fetcher, 2).await;

        assert_eq!(output.report.visited, 2);
        assert!(output.report.queued > 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_marked_bad_and_skipped() {
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            &page("Home", &["/missing", "/missing"]),
        )]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(output.report.visited, 1);
        assert_eq!(output.report.known_bad, 1);
    }

    #[tokio::test]
    async fn test_offsite_links_excluded() {
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            &page("Home", &["https://example.com/x", "/local"]),
        ), (
            "https://caltech.edu/local",
            "https://caltech.edu/local",
            &page("Local", &[]),
        )]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(
            output.graph["https://caltech.edu"],
            vec!["https://caltech.edu/local"]
        );
    }

    #[tokio::test]
    async fn test_out_links_deduplicated_in_order() {
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            &page("Home", &["/b", "/a", "/b"]),
        )]);
        let output = crawl(fetcher, 1).await;

        assert_eq!(
            output.graph["https://caltech.edu"],
            vec!["https://caltech.edu/b", "https://caltech.edu/a"]
        );
    }

    #[tokio::test]
    async fn test_redirect_collision_discarded() {
        // /alias redirects to the already-visited seed; its link to /new
        // must be discarded and /new never fetched.
        let fetcher = StubFetcher::new(&[
            (
                "https://caltech.edu",
                "https://caltech.edu/",
                &page("Home", &["/alias"]),
            ),
            (
                "https://caltech.edu/alias",
                "https://caltech.edu/",
                &page("Home", &["/new"]),
            ),
        ]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(output.report.visited, 1);
        assert!(!output.visited.contains("https://caltech.edu/new"));
    }

    #[tokio::test]
    async fn test_index_contains_page_tokens_once() {
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            "<title>Robotics</title><body><p>robotics robotics lab</p></body>",
        )]);
        let output = crawl(fetcher, 10).await;

        let postings = &output.index["robotics"];
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0], "https://caltech.edu");
        assert!(output.index.contains_key("lab"));
    }

    #[tokio::test]
    async fn test_stop_flag_ends_run_with_partial_results() {
        let stop = Arc::new(AtomicBool::new(true));
        let fetcher = StubFetcher::new(&[(
            "https://caltech.edu",
            "https://caltech.edu/",
            &page("Home", &[]),
        )]);
        let crawler = Crawler::new(test_config(10), fetcher, stop).unwrap();
        let output = crawler.run().await;

        // Stop was requested before the first fetch.
        assert_eq!(output.report.visited, 0);
        assert_eq!(output.report.queued, 1);
    }

    #[tokio::test]
    async fn test_visited_and_bad_sets_disjoint() {
        let fetcher = StubFetcher::new(&[
            (
                "https://caltech.edu",
                "https://caltech.edu/",
                &page("Home", &["/a", "/gone"]),
            ),
            (
                "https://caltech.edu/a",
                "https://caltech.edu/a",
                &page("A", &["/gone"]),
            ),
        ]);
        let output = crawl(fetcher, 10).await;

        assert_eq!(output.report.known_bad, 1);
        assert!(output.visited.is_disjoint(
            &["https://caltech.edu/gone".to_string()].into_iter().collect()
        ));
    }
}
